//! Terminal host for the chat widget.
//!
//! Wires the real HTTP collaborators and a logging navigator into the
//! session controller. This is a development harness, not the production
//! surface: the widget normally lives inside the web front-end.

use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use providers::{HttpAssistantClient, HttpEmailDispatcher};
use shared::identity::Identity;
use shared::settings::WidgetSettings;
use tracing_subscriber::EnvFilter;
use widget::controller::SUGGESTED_PROMPTS;
use widget::{Navigator, SessionController};

/// Navigator that just tracks a route string; the real front-end swaps in
/// its router here.
struct LoggingNavigator {
    route: Mutex<String>,
}

impl Navigator for LoggingNavigator {
    fn current_route(&self) -> String {
        self.route.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn navigate_to(&self, route: &str) {
        tracing::info!(%route, "navigation requested");
        println!("  -> navigating to {route}");
        *self.route.lock().unwrap_or_else(|e| e.into_inner()) = route.to_string();
    }
}

fn identity_from_env() -> Identity {
    match std::env::var("CHATBOT_USER_NAME") {
        Ok(name) if !name.trim().is_empty() => Identity {
            logged_in: true,
            name: Some(name),
            email: std::env::var("CHATBOT_USER_EMAIL").ok(),
        },
        _ => Identity::anonymous(),
    }
}

fn print_new_messages(controller: &SessionController, seen: &mut usize) {
    for message in &controller.messages()[*seen..] {
        let who = if message.is_user() { "you" } else { "bot" };
        println!("[{who}] {}", message.text);
    }
    *seen = controller.messages().len();
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = WidgetSettings::from_env();
    let identity = identity_from_env();

    let assistant = Arc::new(HttpAssistantClient::new(&settings)?);
    let email = Arc::new(HttpEmailDispatcher::new(&settings)?);
    let navigator = Arc::new(LoggingNavigator {
        route: Mutex::new("/".to_string()),
    });

    match assistant.check_health().await {
        Ok(true) => tracing::info!("chatbot backend healthy"),
        Ok(false) => tracing::warn!("chatbot backend reports unhealthy"),
        Err(e) => tracing::warn!(error = %e, "chatbot backend unreachable"),
    }

    let mut controller =
        SessionController::new(settings, identity, assistant, email, navigator);
    controller.toggle_open();

    let mut seen = 0;
    print_new_messages(&controller, &mut seen);
    println!("quick actions: {}", SUGGESTED_PROMPTS.join(" | "));
    println!("(/voice toggles voice input, /quit exits)");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches('\n');

        match line.trim() {
            "/quit" => break,
            "/voice" => {
                if let Some(notice) = controller.toggle_voice() {
                    println!("voice input is not supported here ({notice:?})");
                } else if controller.is_listening() {
                    println!("listening...");
                } else {
                    controller.poll_voice();
                    if !controller.composer().is_empty() {
                        println!("composer: {}", controller.composer());
                    }
                }
            }
            _ => {
                controller.submit(line).await;
                print_new_messages(&controller, &mut seen);
            }
        }
    }

    Ok(())
}
