use clap::{Parser, Subcommand};
use futures_util::StreamExt;
use reqwest::header::AUTHORIZATION;
use serde_json::{json, Value};
use std::io::Write;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Terminal client for the analysis gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway status
    Status,
    /// Log in and print the issued access token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Register a new account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Request a password-recovery email
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Submit a repository for a buffered analysis report
    Analyze {
        #[arg(long)]
        repo_url: String,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        token: Option<String>,
    },
    /// Submit a code snippet and print the analysis stream as it arrives
    AnalyzeCode {
        /// Path of the file to analyze
        #[arg(long)]
        file: String,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Login { email, password } => {
            let res = client
                .post(format!("{}/api/auth/login", cli.url))
                .json(&json!({ "email": email, "password": password }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            let res = client
                .post(format!("{}/api/auth/register", cli.url))
                .json(&json!({ "name": name, "email": email, "password": password }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::ForgotPassword { email } => {
            let res = client
                .post(format!("{}/api/auth/forgot-password", cli.url))
                .json(&json!({ "email": email }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Analyze {
            repo_url,
            model,
            token,
        } => {
            let mut req = client
                .post(format!("{}/api/analyze", cli.url))
                .json(&json!({ "repo_url": repo_url, "model_id": model }));
            if let Some(token) = token {
                req = req.header(AUTHORIZATION, format!("Bearer {}", token));
            }
            let res = req.send().await?;
            print_response(res).await?;
        }
        Commands::AnalyzeCode { file, model, token } => {
            let code = std::fs::read_to_string(&file)?;
            let mut req = client
                .post(format!("{}/api/analyze", cli.url))
                .json(&json!({ "code": code, "model_id": model }));
            if let Some(token) = token {
                req = req.header(AUTHORIZATION, format!("Bearer {}", token));
            }
            let res = req.send().await?;

            let status = res.status();
            if !status.is_success() {
                eprintln!("Error: gateway returned status {}", status);
                if let Ok(text) = res.text().await {
                    eprintln!("Response: {}", text);
                }
                return Ok(());
            }

            let mut stream = res.bytes_stream();
            let mut stdout = std::io::stdout();
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                stdout.write_all(&chunk)?;
                stdout.flush()?;
            }
            println!();
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
