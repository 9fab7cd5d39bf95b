use std::env;

#[tokio::main]
async fn main() {
    env_logger::init();

    let raw_args: Vec<String> = env::args().collect();
    match raw_args.get(1).map(|s| s.as_str()) {
        Some("serve") => {
            let port = raw_args
                .get(2)
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(8080);
            if let Err(e) = sip::api::run_http_server(port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Some("project") => {
            let mut cli_args = vec![raw_args[0].clone()];
            cli_args.extend(raw_args.iter().skip(2).cloned());
            if let Err(e) = sip::api::run_projection_cli(&cli_args) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        _ => {
            eprintln!("Usage: cargo run -- serve [port]");
            eprintln!(
                "       cargo run -- project [--monthly-investment N] [--annual-return PCT] [--years N]"
            );
            std::process::exit(1);
        }
    }
}
