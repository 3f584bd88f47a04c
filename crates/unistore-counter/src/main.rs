use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use unistore::{LoggingMiddleware, Store};

mod actions;
mod commands;
mod config;
mod logger;
mod reducer;
mod state;
mod thunks;

use actions::CounterAction;
use commands::Command;
use config::AppConfig;
use state::{CounterState, CounterStore};

/// Whether the main loop keeps running after a command
enum Flow {
    Continue,
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_file = logger::init()?;

    log::info!("Starting unistore-counter (logging to {})", log_file.display());

    let config = AppConfig::load();
    let store = build_store(&config);

    // "Render" the counter after every committed change
    let weak = store.downgrade();
    let _render = store.subscribe(move || {
        if let Some(store) = weak.upgrade() {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "Value: {}", store.get_state().value)?;
        }
        Ok(())
    });

    println!("Value: {} (type `help` for commands)", store.get_state().value);

    let result = run(&store, &config).await;

    log::info!("Exiting unistore-counter");
    result
}

fn build_store(config: &AppConfig) -> CounterStore {
    let mut builder = Store::builder(reducer::reduce)
        .preloaded_state(CounterState::new(config.initial_value));
    if config.log_actions {
        builder = builder.middleware(LoggingMiddleware::new());
    }
    builder.build()
}

/// Main loop: stdin commands and delayed actions feed the same store
async fn run(store: &CounterStore, config: &AppConfig) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<CounterAction>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let delay = Duration::from_millis(config.async_delay_ms);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match commands::parse(&line) {
                    Ok(Some(command)) => {
                        if let Flow::Quit = handle_command(store, command, delay, &action_tx) {
                            log::info!("Quit requested, pending delayed actions are discarded");
                            return Ok(());
                        }
                    }
                    Ok(None) => {}
                    Err(e) => eprintln!("{:#}", e),
                }
            }
            Some(action) = action_rx.recv() => dispatch_delayed(store, action),
        }
    }

    // Input is exhausted; timers still running keep their sender alive
    log::info!("stdin closed, waiting for pending delayed actions");
    drop(action_tx);
    while let Some(action) = action_rx.recv().await {
        dispatch_delayed(store, action);
    }

    Ok(())
}

fn dispatch_delayed(store: &CounterStore, action: CounterAction) {
    if let Err(e) = store.dispatch(action) {
        log::error!("Delayed dispatch failed: {}", e);
        eprintln!("{}", e);
    }
}

fn handle_command(
    store: &CounterStore,
    command: Command,
    delay: Duration,
    action_tx: &mpsc::UnboundedSender<CounterAction>,
) -> Flow {
    let result = match command {
        Command::Increment => store.dispatch(CounterAction::Incremented).map(drop),
        Command::Decrement => store.dispatch(CounterAction::Decremented).map(drop),
        Command::Add(amount) => store
            .dispatch(CounterAction::IncrementedByAmount { amount })
            .map(drop),
        Command::IncrementIfOdd => thunks::increment_if_odd(store).map(|dispatched| {
            if !dispatched {
                println!("Value is even, not incrementing");
            }
        }),
        Command::IncrementAsync => {
            thunks::increment_async(delay, action_tx.clone());
            println!("Incrementing in {} ms", delay.as_millis());
            Ok(())
        }
        Command::Raw(value) => store.dispatch_value(value).map(drop),
        Command::Show => {
            println!("{:?}", store.get_state());
            Ok(())
        }
        Command::Help => {
            println!("{}", commands::help());
            Ok(())
        }
        Command::Quit => return Flow::Quit,
    };

    if let Err(e) = result {
        log::warn!("Command failed: {}", e);
        eprintln!("{}", e);
    }

    Flow::Continue
}
