use crate::cli::RainArgs;
use crate::exit_codes;
use crate::output;
use crate::term::TermSurface;
use picarlo_core::{
    decode, PiError, PointClient, RenderConfig, RenderController, RenderEvent, SessionState,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub async fn execute(args: RainArgs) -> i32 {
    if args.size < 2 {
        eprintln!("Error: canvas size must be at least 2");
        return exit_codes::INPUT_ERROR;
    }
    if args.fps == 0 {
        eprintln!("Error: fps must be positive");
        return exit_codes::INPUT_ERROR;
    }
    if args.batch == 0 {
        eprintln!("Error: batch size must be positive");
        return exit_codes::INPUT_ERROR;
    }

    let client = match PointClient::new(&args.url) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::TRANSPORT_ERROR;
        }
    };

    // One token gates the fetch and the render loop; Ctrl-C cancels it.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::info!("Interrupt received, stopping");
                cancel.cancel();
            }
        });
    }

    eprintln!("Raining {} points from {}...", args.count, args.url);

    let fetched = match client.fetch_points(args.count, &cancel).await {
        Ok(fetched) => fetched,
        Err(PiError::Cancelled) => {
            println!("Rain cancelled.");
            return exit_codes::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::for_error(&e);
        }
    };

    let result = match decode(&fetched.bytes) {
        Ok(result) => Arc::new(result),
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::for_error(&e);
        }
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut controller = RenderController::new(RenderConfig {
        batch_size: args.batch,
        frame_interval: Duration::from_secs_f64(1.0 / args.fps as f64),
    })
    .with_cancellation_token(cancel.clone());
    controller.set_event_callback(move |event| {
        tx.send(event).ok();
    });

    if let Err(e) = controller.start(
        Arc::clone(&result),
        Box::new(TermSurface::new(args.size)),
        fetched.response_time,
    ) {
        eprintln!("Error: {}", e);
        return exit_codes::for_error(&e);
    }

    let mut summary = None;
    while let Some(event) = rx.recv().await {
        match event {
            RenderEvent::Completed { summary: s } => {
                summary = Some(s);
                break;
            }
            RenderEvent::StateChanged {
                state: SessionState::Stopped,
            } => break,
            _ => {}
        }
    }
    controller.join().await;

    // Park the cursor below the canvas before printing the outcome
    print!("{}", TermSurface::cursor_below(args.size));
    match summary {
        Some(summary) => output::print_summary(&summary),
        None => println!("Rain stopped."),
    }

    exit_codes::SUCCESS
}
