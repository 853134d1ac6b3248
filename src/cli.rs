use clap::{ArgAction, Parser, Subcommand};

use homeman::models::usermodel::UserRole;

#[derive(Parser)]
#[command(name = "homeman")]
#[command(about = "HOME-MAN local services marketplace client")]
pub struct Cli {
    /// Overrides API_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Landing page.
    Home,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, value_parser = parse_role, default_value = "client")]
        role: UserRole,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        location: String,
        /// Trade offered, required for professionals.
        #[arg(long)]
        skill: Option<String>,
    },
    Logout,
    /// Browse verified professionals and your own requests.
    Pros {
        #[arg(long)]
        skill: Option<String>,
    },
    Hire {
        pro_id: String,
        /// Skill filter active when hiring; sent as the booking category.
        #[arg(long)]
        skill: Option<String>,
    },
    Rate {
        pro_id: String,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        value: u8,
    },
    /// Poll bookings and print a notification whenever a status changes.
    Watch,
    Pro {
        #[command(subcommand)]
        command: ProCommand,
    },
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
    Analytics,
    Services {
        #[command(subcommand)]
        command: Option<ServicesCommand>,
    },
}

#[derive(Subcommand)]
pub enum ProCommand {
    Dashboard,
    Accept { booking_id: String },
    Decline { booking_id: String },
}

#[derive(Subcommand)]
pub enum AdminCommand {
    Dashboard {
        #[arg(long)]
        search: Option<String>,
    },
    Verify { pro_id: String },
    /// Toggles suspension.
    Suspend { pro_id: String },
    Delete {
        pro_id: String,
        /// Confirms the permanent deletion.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ServicesCommand {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        number: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long)]
        skill: String,
    },
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        number: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long)]
        skill: String,
    },
    Delete { id: String },
}

fn parse_role(raw: &str) -> Result<UserRole, String> {
    raw.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_outside_stars_is_rejected_by_the_parser() {
        assert!(Cli::try_parse_from(["homeman", "rate", "p1", "6"]).is_err());
        assert!(Cli::try_parse_from(["homeman", "rate", "p1", "5"]).is_ok());
    }

    #[test]
    fn register_defaults_to_client() {
        let cli = Cli::try_parse_from([
            "homeman", "register", "--name", "Amina", "--email", "a@b.so", "--password", "secret1",
            "--location", "burco",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Register { role, .. }) => assert_eq!(role, UserRole::Client),
            _ => panic!("expected register"),
        }
    }

    #[test]
    fn delete_confirmation_flag() {
        let cli = Cli::try_parse_from(["homeman", "admin", "delete", "p1", "--yes"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Admin { command: AdminCommand::Delete { yes: true, .. } })
        ));
    }
}
