/*
    Turns a playblast submission into the task graph the farm manager runs:

        render-<chunk> (one per chunk, no edges between them)
              |
        preview-video  (only with a known frame rate)
              |
        cleanup-frames (only when frames are not kept)

    Compilation is a single pass with no I/O. Any error aborts the whole job,
    a partial graph is never returned.
*/
use super::{chunker, template::TemplateResolver};
use crate::{
    config::CompilerConfig,
    models::{
        command::Command,
        compiled_job::CompiledJob,
        error::CompileError,
        graph::TaskGraph,
        job::Job,
        settings::JobSettings,
        task::{Task, TaskType},
    },
};
use blender::models::{args::Args, format::Format, mode::Mode, overrides::ViewportOverrides};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

// Expanded by the worker, not by us.
pub const BLENDER_EXE: &str = "{blender}";
pub const BLENDER_ARGS: &str = "{blenderArgs}";

pub const VIDEO_TASK: &str = "preview-video";
pub const CLEANUP_TASK: &str = "cleanup-frames";

// Blender writes these next to EXR frames when previews are enabled.
const PREVIEW_EXTENSION: &str = ".jpg";
// ffmpeg refuses odd dimensions for yuv420p.
const EVEN_PAD_FILTER: &str = "pad=ceil(iw/2)*2:ceil(ih/2)*2";

pub fn render_task_name(chunk: &impl std::fmt::Display) -> String {
    format!("render-{chunk}")
}

#[derive(Default)]
pub struct JobCompiler {
    config: CompilerConfig,
    templates: TemplateResolver,
}

impl JobCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            templates: TemplateResolver::default(),
        }
    }

    pub fn with_templates(mut self, templates: TemplateResolver) -> Self {
        self.templates = templates;
        self
    }

    pub fn compile(&self, job: &Job) -> Result<CompiledJob, CompileError> {
        info!("Compiling playblast job {} ({})", job.name, job.id);
        let settings = &job.settings;

        // a video container is rejected whatever else is missing
        let format = match settings.format.trim() {
            "" => None,
            _ => Some(parse_format(&settings.format)?),
        };
        check_required(settings)?;
        let Some(format) = format else {
            return Err(CompileError::MissingSetting("format".to_owned()));
        };
        let overrides = viewport_overrides(settings)?;

        let template = self.output_template(job)?;
        let render_output = self.templates.resolve(&template, job);
        debug!("Render output {template:?} resolved to {render_output:?}");
        let render_output = PathBuf::from(render_output);
        let render_dir = match render_output.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => {
                return Err(CompileError::InvalidSetting {
                    name: "render_output_path".to_owned(),
                    reason: format!("{render_output:?} has no directory part"),
                })
            }
        };

        let mut graph = TaskGraph::new();
        let render_tasks = author_render_tasks(settings, format, &overrides, &render_output)?;
        let render_names: Vec<String> = render_tasks.iter().map(|t| t.name.clone()).collect();
        for task in render_tasks {
            graph.add(task)?;
        }

        if let Some((mut video_task, encoded_glob)) =
            self.author_video_task(settings, format, &render_dir)?
        {
            // the encode needs every frame on disk
            for name in &render_names {
                video_task.add_dependency(name.as_str());
            }
            graph.add(video_task)?;

            if settings.keep_frames {
                debug!("Keeping rendered frames in {render_dir:?}");
            } else {
                // previews are encoded, but the frames they stand in for go too
                let mut input_globs = vec![encoded_glob];
                let frames_glob = frame_glob(&render_dir, &frame_extension(settings, format));
                if !input_globs.contains(&frames_glob) {
                    input_globs.push(frames_glob);
                }
                graph.add(author_cleanup_task(input_globs, &render_dir))?;
            }
        }

        let render_output_path = render_output.to_string_lossy().into_owned();
        let mut resolved = settings.clone();
        resolved.render_output_path = Some(render_output_path.clone());

        info!(
            "Compiled {} tasks for job {} into {} levels",
            graph.len(),
            job.name,
            graph.levels().len()
        );

        Ok(CompiledJob {
            job_id: job.id,
            name: job.name.clone(),
            render_output_path,
            settings: resolved,
            tasks: graph,
        })
    }

    // Explicit template when given, otherwise
    // <root>/<last n dirs of the blend file>/<job name>/{timestamp}/######
    fn output_template(&self, job: &Job) -> Result<String, CompileError> {
        let settings = &job.settings;
        if let Some(path) = settings.render_output_path.as_deref() {
            if !path.trim().is_empty() {
                return Ok(path.to_owned());
            }
        }
        check_job_name(&job.name)?;

        let mut path = PathBuf::from(&settings.render_output_root);
        let mirrored = last_n_dir_parts(
            settings.add_path_components as usize,
            Path::new(&settings.blendfile),
        );
        if !mirrored.as_os_str().is_empty() {
            path.push(mirrored);
        }
        path.push(&job.name);
        path.push("{timestamp}");
        path.push(&self.config.frame_pattern);
        Ok(path.to_string_lossy().into_owned())
    }

    fn author_video_task(
        &self,
        settings: &JobSettings,
        format: Format,
        render_dir: &Path,
    ) -> Result<Option<(Task, String)>, CompileError> {
        let needs_previews = !format.is_ffmpeg_compatible();
        if needs_previews && !settings.has_previews {
            info!("Not authoring video task, {format} frames can't be read by FFmpeg and there are no previews");
            return Ok(None);
        }

        let Some(fps) = settings.known_fps() else {
            info!("Not authoring video task, no FPS known");
            return Ok(None);
        };

        let frames = chunker::display_range(&settings.frames)?;
        let stem = blend_stem(&settings.blendfile);
        let output_file = render_dir.join(format!(
            "{stem}-{frames}.{}",
            self.config.video_container
        ));

        let extension = if needs_previews {
            PREVIEW_EXTENSION.to_owned()
        } else {
            frame_extension(settings, format)
        };
        let input_glob = frame_glob(render_dir, &extension);

        let mut args = if settings.codec_args.is_empty() {
            self.config.video_codec_args.clone()
        } else {
            settings.codec_args.clone()
        };
        args.extend([
            "-vf".to_owned(),
            EVEN_PAD_FILTER.to_owned(),
            "-pix_fmt".to_owned(),
            "yuv420p".to_owned(),
            "-r".to_owned(),
            fps.to_string(),
            // always pass either -n or -y, ffmpeg would prompt otherwise
            "-y".to_owned(),
        ]);

        let mut task = Task::new(VIDEO_TASK, TaskType::Ffmpeg);
        task.add_command(Command::FramesToVideo {
            exe: self.config.ffmpeg_exe.clone(),
            fps,
            input_glob: input_glob.clone(),
            output_file: output_file.to_string_lossy().into_owned(),
            args,
        });

        info!("Creating output video for {format}");
        Ok(Some((task, input_glob)))
    }
}

/// Compile with the default configuration and tokens.
pub fn compile(job: &Job) -> Result<CompiledJob, CompileError> {
    JobCompiler::default().compile(job)
}

fn check_required(settings: &JobSettings) -> Result<(), CompileError> {
    let output_given = !settings.render_output_root.trim().is_empty()
        || settings
            .render_output_path
            .as_deref()
            .is_some_and(|p| !p.trim().is_empty());

    let required = [
        ("frames", !settings.frames.trim().is_empty()),
        ("render_output_root", output_given),
        ("scene", !settings.scene.trim().is_empty()),
        ("format", !settings.format.trim().is_empty()),
        ("blendfile", !settings.blendfile.trim().is_empty()),
    ];

    match required.iter().find(|(_, present)| !present) {
        Some((name, _)) => Err(CompileError::MissingSetting(name.to_string())),
        None => Ok(()),
    }
}

fn parse_format(name: &str) -> Result<Format, CompileError> {
    let format: Format = name
        .parse()
        .map_err(|_| CompileError::UnsupportedFormat(name.to_owned()))?;
    if format.is_video() {
        return Err(CompileError::UnsupportedFormat(name.to_owned()));
    }
    Ok(format)
}

fn viewport_overrides(settings: &JobSettings) -> Result<ViewportOverrides, CompileError> {
    let resolution_percentage = match settings.resolution_percentage {
        None => None,
        Some(p) => match u8::try_from(p) {
            Ok(p) if (1..=100).contains(&p) => Some(p),
            _ => {
                return Err(CompileError::InvalidSetting {
                    name: "resolution_percentage".to_owned(),
                    reason: format!("{p} is outside 1..=100"),
                })
            }
        },
    };

    Ok(ViewportOverrides {
        resolution_percentage,
        display_mode: settings.display_mode,
    })
}

fn author_render_tasks(
    settings: &JobSettings,
    format: Format,
    overrides: &ViewportOverrides,
    render_output: &Path,
) -> Result<Vec<Task>, CompileError> {
    let chunks = chunker::chunk_frames(&settings.frames, settings.chunk_size)?;
    debug!("Authoring {} render tasks for {}", chunks.len(), settings.frames);

    let tasks = chunks
        .into_iter()
        .map(|chunk| {
            let mut args = Args::new(render_output, Mode::from(chunk));
            args.scene = Some(settings.scene.clone());
            args.format = Some(format);
            args.engine = settings.display_mode.map(|mode| mode.engine());
            args.overrides = overrides.clone();
            args.extra = settings.blender_args_after.clone();

            let mut task = Task::new(render_task_name(&chunk), TaskType::Blender);
            task.add_command(Command::BlenderRender {
                exe: BLENDER_EXE.to_owned(),
                exe_args: BLENDER_ARGS.to_owned(),
                args_before: settings.blender_args_before.clone(),
                blendfile: settings.blendfile.clone(),
                args: args.create_arg_list(),
            });
            task
        })
        .collect();
    Ok(tasks)
}

// The job name becomes exactly one directory under the output root.
fn check_job_name(name: &str) -> Result<(), CompileError> {
    let mut components = Path::new(name).components();
    let single_dir = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if single_dir && !name.contains(['/', '\\']) {
        return Ok(());
    }
    Err(CompileError::InvalidSetting {
        name: "name".to_owned(),
        reason: format!("{name:?} is not a single directory name"),
    })
}

fn frame_glob(render_dir: &Path, extension: &str) -> String {
    render_dir
        .join(format!("*{extension}"))
        .to_string_lossy()
        .into_owned()
}

fn author_cleanup_task(input_globs: Vec<String>, render_dir: &Path) -> Task {
    let mut task = Task::new(CLEANUP_TASK, TaskType::FileManagement);
    task.add_command(Command::DeleteFrames {
        input_globs,
        directory: render_dir.to_string_lossy().into_owned(),
    });
    task.add_dependency(VIDEO_TASK);
    task
}

fn frame_extension(settings: &JobSettings, format: Format) -> String {
    match settings.image_file_extension.as_deref().map(str::trim) {
        Some(ext) if !ext.is_empty() => {
            if ext.starts_with('.') {
                ext.to_owned()
            } else {
                format!(".{ext}")
            }
        }
        _ => format.extension().to_owned(),
    }
}

// "shot.flamenco.blend" -> "shot", packed copies get the .flamenco infix
fn blend_stem(blendfile: &str) -> String {
    Path::new(blendfile)
        .file_stem()
        .map(|s| s.to_string_lossy().replace(".flamenco", ""))
        .unwrap_or_default()
}

/// Last `n` directory names the blend file lives in.
fn last_n_dir_parts(n: usize, blendfile: &Path) -> PathBuf {
    let dirs: Vec<&std::ffi::OsStr> = blendfile
        .parent()
        .map(|parent| {
            parent
                .components()
                .filter_map(|c| match c {
                    Component::Normal(name) => Some(name),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();
    dirs[dirs.len().saturating_sub(n)..].iter().collect()
}
