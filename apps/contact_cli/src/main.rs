use anyhow::{bail, Result};
use clap::Parser;
use contact_form::{load_settings, ContactFormController, SubmitOutcome};
use shared::domain::ContactField;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Send a message through the storefront contact form")]
struct Args {
    /// Overrides API_BASE_URL, APP__API_BASE_URL and storefront.toml.
    #[arg(long)]
    api_base_url: Option<String>,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    subject: String,
    #[arg(long, default_value = "")]
    message: String,
    /// Prompt for each field until it passes validation.
    #[arg(long, short)]
    interactive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = args.api_base_url.clone() {
        settings.api_base_url = Some(url);
    }
    let controller = ContactFormController::from_settings(&settings)?;

    if args.interactive {
        prompt_fields(&controller).await?;
    } else {
        for (field, value) in [
            (ContactField::Name, args.name),
            (ContactField::Email, args.email),
            (ContactField::Subject, args.subject),
            (ContactField::Message, args.message),
        ] {
            controller.on_field_change(field, value.clone()).await;
            controller.on_field_blur(field, value).await;
        }
    }

    debug!("submitting contact form");
    match controller.submit().await {
        SubmitOutcome::Succeeded => {
            println!("Thanks! Your message has been sent.");
            Ok(())
        }
        SubmitOutcome::Invalid => {
            for (field, err) in controller.snapshot().await.visible_errors() {
                eprintln!("{field}: {err}");
            }
            bail!("contact form has invalid fields")
        }
        SubmitOutcome::Failed => {
            bail!("Sorry, something went wrong sending your message. Please try again.")
        }
        SubmitOutcome::Busy => bail!("a submission is already in progress"),
    }
}

async fn prompt_fields(controller: &ContactFormController) -> Result<()> {
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    for field in ContactField::ALL {
        loop {
            let label = if field.is_required() {
                format!("{field}: ")
            } else {
                format!("{field} (optional): ")
            };
            stdout.write_all(label.as_bytes()).await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                bail!("stdin closed before the form was complete");
            };
            controller.on_field_change(field, line.clone()).await;
            controller.on_field_blur(field, line).await;

            match controller.snapshot().await.visible_error(field) {
                Some(err) => println!("  {err}"),
                None => break,
            }
        }
    }

    Ok(())
}
