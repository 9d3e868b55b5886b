fn main() -> anyhow::Result<()> {
    playblast_lib::run()
}
