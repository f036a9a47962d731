use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = space_connect::cli::Cli::parse();

    if let Err(err) = space_connect::run(cli).await {
        if !err.is_reported() {
            eprintln!("error: {err}");
        }
        std::process::exit(1);
    }
}
