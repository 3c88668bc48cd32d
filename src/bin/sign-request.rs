//! Produce `X-Signature` and `X-Timestamp` headers for a request.
//!
//! ```text
//! API_SECRET=s3cret sign-request --method POST --path /users \
//!     --body '{"nombre":"Celeste","sexo":"femenino"}'
//! ```

use clap::Parser;
use signed_users_api::{RequestSigner, SharedSecret};

#[derive(Parser, Debug)]
#[command(name = "sign-request", about = "Sign a request for the Signed Users API")]
struct Args {
    /// Shared secret; read from API_SECRET when omitted
    #[arg(long, env = "API_SECRET", hide_env_values = true)]
    secret: String,

    /// HTTP method
    #[arg(long, default_value = "GET")]
    method: String,

    /// Path and query as sent, without the /api mount prefix
    #[arg(long)]
    path: String,

    /// Exact request body
    #[arg(long, default_value = "")]
    body: String,

    /// Timestamp in milliseconds since epoch; defaults to now
    #[arg(long)]
    timestamp: Option<i64>,

    /// Base URL used for the printed curl command
    #[arg(long, default_value = "http://127.0.0.1:8080/api")]
    base_url: String,
}

fn main() {
    let args = Args::parse();

    let secret = match SharedSecret::new(args.secret.as_bytes()) {
        Ok(secret) => secret,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };

    let signer = RequestSigner::new(secret);
    let headers = match args.timestamp {
        Some(ts) => signer.sign_at(&args.method, &args.path, args.body.as_bytes(), ts),
        None => signer.sign(&args.method, &args.path, args.body.as_bytes()),
    };

    println!("X-Signature: {}", headers.signature);
    println!("X-Timestamp: {}", headers.timestamp);
    println!();

    let method = args.method.to_ascii_uppercase();
    let url = format!("{}{}", args.base_url.trim_end_matches('/'), args.path);
    print!(
        "curl -X {method} -H 'X-Signature: {}' -H 'X-Timestamp: {}'",
        headers.signature, headers.timestamp
    );
    if !args.body.is_empty() {
        print!(" -H 'Content-Type: application/json' --data-raw '{}'", args.body);
    }
    println!(" '{url}'");
}
