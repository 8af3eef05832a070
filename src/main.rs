use clap::Parser;
use std::process;
use tracing::{Level, error};
use tracing_subscriber::EnvFilter;

use taskrank::{
    cli::{Cli, Command},
    config::{ClientConfiguration, load_config},
    dispatch::ServiceClient,
    error::{Result, TaskrankError},
    task::TaskList,
    workspace::Workspace,
};

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    init_tracing(args.verbose);

    if let Err(e) = run_taskrank(args).await {
        report_failure(&e);
        process::exit(1);
    }
}

fn report_failure(e: &TaskrankError) {
    error!("{}", e);
    eprintln!("Error: {}", e);
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run_taskrank(args: Cli) -> Result<()> {
    let section = load_config(&args.config)?;
    let config = ClientConfiguration::resolve(&args, section);
    config.color.apply();

    let tasks = TaskList::load(&config.tasks_file)?;
    let mut workspace = Workspace::new(tasks);

    match args.command {
        Command::Add(add) => {
            let task = workspace.add_task(&add.into())?;
            workspace.tasks().save(&config.tasks_file)?;
            println!(
                "Added task '{}' ({} pending in {})",
                task.title,
                workspace.tasks().len(),
                config.tasks_file.display()
            );
        }
        Command::Analyze => {
            let client = ServiceClient::new(&config.base_url, config.timeout)?;
            workspace.run_analysis(&client, &config.strategy).await?;
            print_results(&workspace);
        }
        Command::Suggest => {
            let client = ServiceClient::new(&config.base_url, config.timeout)?;
            workspace.run_suggestion(&client, &config.strategy).await?;
            print_results(&workspace);
        }
        Command::Show => {
            println!("{}", workspace.tasks().to_buffer()?);
        }
    }

    Ok(())
}

fn print_results(workspace: &Workspace) {
    if let Some(summary) = workspace.summary().filter(|s| !s.is_empty()) {
        println!("{}\n", summary);
    }

    if let Some(results) = workspace.results() {
        println!("{}", results.to_colored_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failures_are_logged_at_the_default_level() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::WARN)
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            report_failure(&TaskrankError::Validation("Title is required".to_string()));
        });

        let logged = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("ERROR"), "{logged}");
        assert!(logged.contains("Title is required"), "{logged}");
    }
}
