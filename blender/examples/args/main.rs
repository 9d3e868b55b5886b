use blender::models::{args::Args, display_mode::DisplayMode, format::Format, mode::Mode};

// Print the argument list a farm worker would pass to blender for one chunk.
// usage: cargo run --example args -- <output> <start> <end>
fn main() {
    let args = std::env::args().collect::<Vec<String>>();
    let output = args.get(1).map(String::as_str).unwrap_or("/tmp/playblast/######");
    let start = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1);
    let end = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(start);

    let mode = if start == end {
        Mode::Frame(start)
    } else {
        Mode::Section { start, end }
    };

    let display = DisplayMode::Solid;
    let mut args = Args::new(output, mode);
    args.engine = Some(display.engine());
    args.format = Some(Format::PNG);
    args.overrides.display_mode = Some(display);
    args.overrides.resolution_percentage = Some(50);

    println!("blender -b <file.blend> {}", args.create_arg_list().join(" "));
}
