//! Command handlers.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use worldbuilder_deploy::label::normalize_custom;
use worldbuilder_deploy::{
    DeployEvent, DeployOrchestrator, DeployStage, DeploymentRequest, DeploymentResult, Label,
    check_available, package, resolve, scan_assets, verify_deployment,
};
use worldbuilder_protocol::messages::Subdomain;
use worldbuilder_protocol::types::VerificationStatus;
use worldbuilder_site_api::Client;

use crate::cli::{Cli, Commands};
use crate::config::{Config, config_path};

/// Runs the parsed command. Returns `false` when the command failed.
pub async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Deploy {
            game,
            name,
            subdomain,
            username,
            assets,
            no_check,
            no_verify,
            json,
        } => {
            let request = DeploymentRequest {
                game_source: read_game(&game)?,
                project_name: name,
                custom_label: subdomain,
                owner: username,
                assets: match assets {
                    Some(dir) => scan_assets(&dir)
                        .with_context(|| format!("failed to read assets from {}", dir.display()))?,
                    None => Default::default(),
                },
            };
            let mut options = config.deploy_options();
            if no_check {
                options.check_availability = false;
            }
            if no_verify {
                options.verify = None;
            }

            let client = Client::new(config.client_config()?)?;
            let mut orchestrator = DeployOrchestrator::new();
            let printer = orchestrator.take_events().map(|mut rx| {
                tokio::spawn(async move {
                    while let Some(event) = rx.recv().await {
                        print_event(&event);
                    }
                })
            });

            let result = orchestrator.deploy(&client, request, &options).await;

            // Closing the channel ends the printer.
            drop(orchestrator);
            if let Some(printer) = printer {
                let _ = printer.await;
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }
            Ok(result.succeeded)
        }

        Commands::Check { subdomain } => {
            let label = Label::parse(&normalize_custom(&subdomain))?;
            let client = Client::new(config.client_config()?)?;
            let availability = check_available(&client, &label).await;
            println!("{}: {}", label, availability.message);
            Ok(availability.available)
        }

        Commands::Package {
            game,
            title,
            output,
        } => {
            let html = package(&read_game(&game)?, &title);
            match output {
                Some(path) => {
                    std::fs::write(&path, html)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    tracing::info!(path = %path.display(), "page written");
                }
                None => print!("{html}"),
            }
            Ok(true)
        }

        Commands::Verify {
            url,
            attempts,
            interval,
            json,
        } => {
            let mut policy = config.verify_policy();
            if let Some(attempts) = attempts {
                policy.attempts = attempts;
            }
            if let Some(secs) = interval {
                policy.interval = Duration::from_secs(secs);
            }

            // Checking a public URL never touches the registry.
            let client = Client::without_registry(Duration::from_secs(config.timeout_secs))?;
            let response = verify_deployment(&client, &url, &policy).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}", response.message);
            }
            Ok(response.status != VerificationStatus::Failed)
        }

        Commands::List { username, json } => {
            let owner = username.unwrap_or_else(|| config.owner.clone());
            let client = Client::new(config.client_config()?)?;
            let subdomains = client
                .user_subdomains(&owner)
                .await
                .with_context(|| format!("failed to list subdomains for {owner}"))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&subdomains)?);
            } else if subdomains.is_empty() {
                println!("No subdomains registered for {owner}");
            } else {
                for entry in &subdomains {
                    println!("{}", listing_line(entry));
                }
            }
            Ok(true)
        }

        Commands::Resolve { project, subdomain } => {
            match resolve(&project, subdomain.as_deref()) {
                Ok(label) => {
                    println!("{label}");
                    println!("{}", config.deploy_options().public_url(label.as_str()));
                    Ok(true)
                }
                Err(e) => {
                    eprintln!("{e}");
                    Ok(false)
                }
            }
        }

        Commands::Config => {
            let path = match &cli.config {
                Some(p) => p.clone(),
                None => config_path()?,
            };
            println!("# {}", path.display());
            print!("{}", toml::to_string_pretty(&config)?);
            if let Some(url) = config.api_url() {
                println!("# effective api_url = {url:?}");
            }
            if let Ok(client_config) = config.client_config() {
                let client = Client::new(client_config)?;
                let endpoints = client.endpoints();
                println!("# register        = {}", endpoints.register);
                println!("# check           = {}", endpoints.check);
                println!("# upload urls     = {}", endpoints.upload_urls);
                println!("# user subdomains = {}", endpoints.user_subdomains);
            }
            Ok(true)
        }
    }
}

fn read_game(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn listing_line(entry: &Subdomain) -> String {
    let created = chrono::DateTime::from_timestamp(entry.created_at, 0)
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!("{:<24} {:<48} {}", entry.subdomain, entry.url, created)
}

fn print_event(event: &DeployEvent) {
    match event {
        DeployEvent::Stage(stage) => {
            if let Some(text) = stage_text(stage) {
                eprintln!("==> {text}");
            }
        }
        DeployEvent::AssetFailed { name } => eprintln!("    asset failed: {name}"),
    }
}

fn stage_text(stage: &DeployStage) -> Option<&'static str> {
    match stage {
        DeployStage::Idle | DeployStage::Done { .. } => None,
        DeployStage::Resolving => Some("Resolving subdomain"),
        DeployStage::Checking => Some("Checking availability"),
        DeployStage::Packaging => Some("Packaging game"),
        DeployStage::Publishing => Some("Publishing"),
        DeployStage::Verifying => Some("Verifying deployment"),
    }
}

fn print_result(result: &DeploymentResult) {
    if !result.succeeded {
        eprintln!("Deploy failed: {}", result.message);
        return;
    }

    println!("{}", result.message);
    if let Some(url) = &result.url {
        println!("URL: {url}");
    }
    for name in &result.assets_failed {
        println!("Missing asset: {name}");
    }
    if let Some(embed) = result.embed_code() {
        println!("\nEmbed code:\n{embed}");
    }
}
