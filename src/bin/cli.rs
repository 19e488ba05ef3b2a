use clap::{Parser, Subcommand};
use retirewise::{
    db,
    models::user::Role,
    repositories::user_repository::SqliteUserRepository,
    services::user_service::{SignupRequest, UserService},
};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "retirewise-cli")]
#[command(about = "CLI tool for managing RetireWise+ users", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User management commands
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a new user
    Create {
        /// Full name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,

        /// Create the account with the admin role
        #[arg(long)]
        admin: bool,
    },

    /// List users
    List {
        /// Maximum number of users to display
        #[arg(short, long, default_value_t = 100)]
        limit: i64,

        /// Offset for pagination
        #[arg(short = 'o', long, default_value_t = 0)]
        offset: i64,
    },

    /// Grant the admin role to an existing user
    Promote {
        /// Email address of the user to promote
        #[arg(short, long)]
        email: String,
    },

    /// Revoke the admin role
    Demote {
        /// Email address of the user to demote
        #[arg(short, long)]
        email: String,
    },

    /// Set a new password for a user
    SetPassword {
        /// Email address of the user
        #[arg(short, long)]
        email: String,

        /// New password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

fn get_password(prompt: &str) -> anyhow::Result<String> {
    use std::io::{self, Write};
    print!("{}: ", prompt);
    io::stdout().flush()?;

    Ok(rpassword::read_password()?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Connect to database
    let pool = db::create_pool().await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Initialize services
    let user_repository = Arc::new(SqliteUserRepository::new(pool));
    let user_service = UserService::new(user_repository);

    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::User { command } => match command {
            UserCommands::Create {
                name,
                email,
                password,
                admin,
            } => {
                let password = match password {
                    Some(pw) => pw,
                    None => {
                        let pw = get_password("Password")?;
                        let confirm = get_password("Confirm password")?;
                        if pw != confirm {
                            eprintln!("Passwords do not match");
                            std::process::exit(1);
                        }
                        pw
                    }
                };

                let role = if admin { Role::Admin } else { Role::User };
                let user = user_service
                    .create_user(
                        SignupRequest {
                            name,
                            email,
                            phone: None,
                            locality: None,
                            password,
                        },
                        role,
                    )
                    .await?;
                println!("Created {} user: {} (id {})", user.role, user.email, user.id);
            }

            UserCommands::List { limit, offset } => {
                let users = user_service.list_users(limit, offset).await?;
                for user in users {
                    println!(
                        "{:>5}  {:<30}  {:<8}  {}",
                        user.id,
                        user.email,
                        user.role,
                        user.created_at.as_deref().unwrap_or("-")
                    );
                }
            }

            UserCommands::Promote { email } => {
                user_service.set_role(&email, Role::Admin).await?;
                println!("{} is now an admin", email);
            }

            UserCommands::Demote { email } => {
                user_service.set_role(&email, Role::User).await?;
                println!("{} is no longer an admin", email);
            }

            UserCommands::SetPassword { email, password } => {
                let password = match password {
                    Some(pw) => pw,
                    None => get_password("New password")?,
                };
                user_service.set_password(&email, &password).await?;
                println!("Password updated for {}", email);
            }
        },
    }

    Ok(())
}
