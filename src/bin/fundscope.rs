/// FundScope Dashboard Renderer
///
/// Loads the dashboard document, applies interaction events read as JSON lines
/// from stdin, and writes the final dashboard frame to stdout.

use fundscope::{
    DashboardConfig, DashboardSink, DashboardState, HtmlSink, InteractionEvent, JsonSink,
    OutputFormat,
};
use log::{error, info, warn};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match DashboardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };

    let stdout = io::stdout();
    let mut sink: Box<dyn DashboardSink> = match config.output {
        OutputFormat::Html => Box::new(HtmlSink::new(stdout.lock())),
        OutputFormat::Json => Box::new(JsonSink::new(stdout.lock())),
    };

    let dashboard = match DashboardState::load(&config.data_path) {
        Ok(dashboard) => dashboard.with_table_rows(config.table_rows),
        Err(e) => {
            error!("{}", e);
            if let Err(e) = sink.load_failed(&e.to_string()) {
                error!("failed to write load error: {}", e);
            }
            return ExitCode::FAILURE;
        }
    };
    info!("rendering {} as {:?}", config.data_path.display(), config.output);

    match run(dashboard, sink.as_mut()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(mut dashboard: DashboardState, sink: &mut dyn DashboardSink) -> io::Result<()> {
    let stdin = io::stdin();
    let mut applied = 0usize;

    for (number, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match InteractionEvent::parse(&line) {
            Ok(event) => {
                dashboard.handle(event);
                applied += 1;
            }
            Err(e) => warn!("ignoring event on line {}: {}", number + 1, e),
        }
    }

    info!(
        "applied {} events, {} of {} funds in view",
        applied,
        dashboard.active_view().len(),
        dashboard.store().len()
    );

    dashboard.render_to(sink)?;
    io::stdout().flush()
}
