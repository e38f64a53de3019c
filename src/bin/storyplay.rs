use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use storyplay::{
    ChoiceOutcome, MemoryBackend, PlaybackController, PlaybackOpts, Project, ProjectPlayer,
    Scene, VarValue, Variables,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "storyplay", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a scene or project JSON file.
    Validate(ValidateArgs),
    /// Play a scene or project headlessly with simulated audio.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input scene or project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input scene or project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Stop after this many seconds of scene time per scene (defaults to the full scene).
    #[arg(long)]
    seconds: Option<f64>,

    /// Host step fed to the engine, in milliseconds.
    #[arg(long, default_value_t = 16)]
    step_ms: u64,

    /// Variable assignment `name=value`; the value is parsed as JSON, else taken as text.
    #[arg(long = "var")]
    vars: Vec<String>,

    /// Choice to select when a scene ends (projects only); repeat to follow a path.
    #[arg(long = "choose")]
    choices: Vec<String>,

    /// Optional engine options JSON.
    #[arg(long)]
    opts: Option<PathBuf>,
}

enum Input {
    Scene(Scene),
    Project(Project),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn load_input(path: &Path) -> anyhow::Result<Input> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read input '{}'", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parse JSON '{}'", path.display()))?;
    if value.get("scenes").is_some() {
        Ok(Input::Project(Project::from_json(&text)?))
    } else {
        Ok(Input::Scene(Scene::from_json(&text)?))
    }
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    match load_input(&args.in_path)? {
        Input::Scene(scene) => {
            scene.validate()?;
            println!(
                "ok: scene '{}' ({} layers, {} animations, {} tracks, {} choices)",
                scene.id,
                scene.layers.len(),
                scene.animations.len(),
                scene.audio_tracks.len(),
                scene.choices.len()
            );
        }
        Input::Project(project) => {
            project.validate()?;
            println!(
                "ok: project '{}' ({} scenes)",
                project.id,
                project.scenes.len()
            );
        }
    }
    Ok(())
}

fn parse_vars(raw: &[String]) -> anyhow::Result<Variables> {
    let mut vars = Variables::new();
    for entry in raw {
        let (name, value) = entry
            .split_once('=')
            .with_context(|| format!("variable '{entry}' is not name=value"))?;
        let value = serde_json::from_str::<VarValue>(value)
            .unwrap_or_else(|_| VarValue::Text(value.to_owned()));
        vars.insert(name.trim().to_owned(), value);
    }
    Ok(vars)
}

fn load_opts(path: Option<&Path>) -> anyhow::Result<PlaybackOpts> {
    let Some(path) = path else {
        return Ok(PlaybackOpts::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read options '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse options '{}'", path.display()))
}

fn log_cues(controller: &mut PlaybackController) {
    controller.on_timecode_hit(|time, track| {
        tracing::info!(track = %track.id, time, "cue");
    });
}

/// Run the current scene until it stops or the time budget runs out.
fn run_scene(
    controller: &mut PlaybackController,
    backend: &MemoryBackend,
    step: Duration,
    limit: Option<f64>,
) {
    controller.play();
    let budget = limit
        .unwrap_or(f64::INFINITY)
        .min(controller.snapshot().duration);
    while controller.snapshot().is_playing && controller.snapshot().current_time < budget {
        controller.advance(step);
        backend.advance(step.as_secs_f64());
    }
    let snap = controller.snapshot();
    tracing::info!(time = snap.current_time, "scene stopped");
}

fn print_choices<'a>(choices: impl IntoIterator<Item = &'a storyplay::Choice>) {
    let mut any = false;
    for c in choices {
        any = true;
        println!(
            "choice {}: {}{}",
            c.id,
            c.text,
            c.target_scene_id
                .as_deref()
                .map(|t| format!(" -> {t}"))
                .unwrap_or_default()
        );
    }
    if !any {
        println!("no visible choices");
    }
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let opts = load_opts(args.opts.as_deref())?;
    let step = Duration::from_millis(args.step_ms.max(1));
    let extra = parse_vars(&args.vars)?;
    let backend = MemoryBackend::new();

    match load_input(&args.in_path)? {
        Input::Scene(scene) => {
            scene.validate()?;
            let mut controller = PlaybackController::new(Box::new(backend.clone()), opts);
            log_cues(&mut controller);
            controller.load_scene(std::sync::Arc::new(scene));
            run_scene(&mut controller, &backend, step, args.seconds);
            print_choices(controller.visible_choices(&extra));
        }
        Input::Project(project) => {
            let mut player = ProjectPlayer::new(project, Box::new(backend.clone()), opts)?;
            storyplay::assign(player.variables_mut(), &extra);
            log_cues(player.controller_mut());

            let mut path = args.choices.iter();
            loop {
                println!("scene {}", player.current_scene_id().unwrap_or("?"));
                run_scene(player.controller_mut(), &backend, step, args.seconds);
                let Some(choice) = path.next() else {
                    break;
                };
                match player.select_choice(choice)? {
                    ChoiceOutcome::Navigated { scene_id } => {
                        tracing::info!(choice = %choice, scene = %scene_id, "navigated");
                    }
                    ChoiceOutcome::UnknownTarget { scene_id } => {
                        anyhow::bail!("choice '{choice}' leads to unknown scene '{scene_id}'");
                    }
                    ChoiceOutcome::Stayed => {
                        tracing::info!(choice = %choice, "choice applied; staying");
                    }
                }
            }
            print_choices(player.visible_choices());
        }
    }
    Ok(())
}
