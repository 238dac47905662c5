use bubbletea_rs::{quit, Cmd, Model, Msg, Program};
use clap::Parser;
use quiztimer_widgets::prelude::*;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Runs a quiz page with the elapsed-time counter.
#[derive(Parser, Debug)]
struct Args {
    /// TOML file overriding labels, prompts and timings.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

static CONFIG: OnceLock<TimerConfig> = OnceLock::new();

struct QuizPage {
    timer: QuizTimerModel,
    submitted: Option<SubmittedMsg>,
}

impl Model for QuizPage {
    fn init() -> (Self, Option<Cmd>) {
        let config = CONFIG.get().cloned().unwrap_or_default();
        let mut timer = match timer_with_config(config) {
            Ok(timer) => timer,
            Err(err) => {
                log::error!("falling back to the stock timer: {err}");
                timer_new()
            }
        };
        let cmd = timer.init();
        (
            Self {
                timer,
                submitted: None,
            },
            cmd,
        )
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(submitted) = msg.downcast_ref::<SubmittedMsg>() {
            if submitted.id == self.timer.id() {
                log::info!("quiz submitted: {:?}", submitted.fields);
                self.submitted = Some(submitted.clone());
                return Some(quit());
            }
        }
        self.timer.update(msg)
    }

    fn view(&self) -> String {
        let mut out = String::from("Quiz in progress\n\n");
        out.push_str(&self.timer.view());
        if let Some(submitted) = &self.submitted {
            out.push_str(&format!(
                "\n\nSubmitted after {}",
                format_elapsed(submitted.elapsed_seconds)
            ));
        }
        out.push('\n');
        out
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let args = Args::parse();

    let config = match args.config {
        Some(path) => TimerConfig::load(path)?,
        None => TimerConfig::default(),
    };
    if CONFIG.set(config).is_err() {
        log::warn!("timer configuration was already set; keeping the first one");
    }

    let program = Program::<QuizPage>::builder().alt_screen(true).build()?;
    program.run().await?;
    Ok(())
}
