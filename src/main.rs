// src/main.rs

use taskdag::{cli, logging, run};

#[tokio::main]
async fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("taskdag error: {err:?}");
        std::process::exit(1);
    }

    match run(args).await {
        Ok(result) if result.success => {}
        Ok(_) => std::process::exit(1),
        Err(err) => {
            eprintln!("taskdag error: {err:?}");
            std::process::exit(1);
        }
    }
}
