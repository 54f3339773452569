#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::Context;
    use clap::{Parser, Subcommand};
    use log::info;
    use warbler_client::config::{like_button_id, MESSAGES_CONTAINER_ID, NEW_MESSAGE_SAVE_BUTTON_ID, NEW_MESSAGE_TEXT_ID};
    use warbler_client::core::helpers::init_logging;
    use warbler_client::{HttpApi, MemoryPage, MessageController, Outcome, UiEvent};

    #[derive(Parser, Debug)]
    #[command(name = "warbler", about = "Like and post Warbler messages from the terminal")]
    struct Cli {
        /// Server root, defaults to WARBLER_BASE_URL
        #[arg(long)]
        base_url: Option<String>,

        #[arg(long, requires = "password")]
        username: Option<String>,

        #[arg(long, requires = "username")]
        password: Option<String>,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand, Debug)]
    enum Command {
        /// Toggle the like on a message
        Like {
            message_id: i64,
            /// The message is currently liked on the page
            #[arg(long)]
            liked: bool,
        },
        /// Post a new message
        Post {
            text: String,
            /// Page the form is submitted from
            #[arg(long, default_value = "/")]
            page: String,
        },
    }

    pub async fn run() -> anyhow::Result<()> {
        init_logging();
        let cli = Cli::parse();

        let api = match &cli.base_url {
            Some(base_url) => HttpApi::new(base_url)?,
            None => HttpApi::from_env()?,
        };
        info!("using {}", api.base_url());

        if let (Some(username), Some(password)) = (&cli.username, &cli.password) {
            api.login(username, password)
                .await
                .with_context(|| format!("login as {} failed", username))?;
            info!("logged in as {}", username);
        }

        let outcome = match cli.command {
            Command::Like { message_id, liked } => {
                let page = MemoryPage::timeline("/").with_like_button(message_id, liked);
                let mut controller = MessageController::mount(api, page);
                let outcome = controller.dispatch(&UiEvent::click(like_button_id(message_id))).await;
                controller.unmount();
                outcome?
            }
            Command::Post { text, page } => {
                let mut page = MemoryPage::timeline(&page);
                page.set_input_value(NEW_MESSAGE_TEXT_ID, &text);
                let mut controller = MessageController::mount(api, page);
                let outcome = controller.dispatch(&UiEvent::click(NEW_MESSAGE_SAVE_BUTTON_ID)).await;
                let (_, page) = controller.unmount();
                if let Some(item) = page.items(MESSAGES_CONTAINER_ID).first() {
                    println!("{}", item);
                }
                outcome?
            }
        };

        match outcome {
            Outcome::Liked { message_id, state } => println!("message {}: {:?}", message_id, state),
            Outcome::Posted { message, inserted } => {
                println!("created message {} ({})", message.id, message.timestamp);
                if !inserted {
                    println!("page shows no timeline, nothing inserted");
                }
            }
            Outcome::Ignored => {}
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    native::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
