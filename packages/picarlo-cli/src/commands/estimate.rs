use crate::cli::EstimateArgs;
use crate::exit_codes;
use crate::output;
use picarlo_core::{decode, PointClient};
use tokio_util::sync::CancellationToken;

pub async fn execute(args: EstimateArgs) -> i32 {
    let client = match PointClient::new(&args.url) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::TRANSPORT_ERROR;
        }
    };

    if !args.json {
        eprintln!("Estimating pi with {} points from {}...", args.count, args.url);
    }

    let fetched = match client
        .fetch_points(args.count, &CancellationToken::new())
        .await
    {
        Ok(fetched) => fetched,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::for_error(&e);
        }
    };

    let result = match decode(&fetched.bytes) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::for_error(&e);
        }
    };

    let summary = result.summary(fetched.response_time);

    if args.json {
        match output::to_json(&summary, args.compact) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
        }
    } else {
        output::print_summary(&summary);
    }

    exit_codes::SUCCESS
}
