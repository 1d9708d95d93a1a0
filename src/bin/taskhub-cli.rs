use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use taskhub_sdk::{
    NewProject, NewTask, ProjectUpdate, SdkError, TaskHubClient, TaskStatus, TaskUpdate,
};

#[derive(Parser)]
#[command(name = "taskhub-cli")]
#[command(about = "Command-line client for the TaskHub API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service and database health
    Health,
    /// Manage projects
    #[command(subcommand)]
    Projects(ProjectCommands),
    /// Manage tasks within a project
    #[command(subcommand)]
    Tasks(TaskCommands),
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// List all projects
    List,
    /// Show a project and its tasks
    Show { id: i64 },
    /// Create a project
    Create {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Update a project's fields
    Update {
        id: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long)]
        clear_description: bool,
    },
    /// Delete a project and all of its tasks
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// List a project's tasks
    List { project: i64 },
    /// Show one task
    Show { project: i64, id: i64 },
    /// Create a task
    Create {
        project: i64,
        title: String,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Update a task's fields
    Update {
        project: i64,
        id: i64,
        #[arg(short, long)]
        title: Option<String>,
        #[command(flatten)]
        fields: TaskFields,
        #[arg(long, conflicts_with = "description")]
        clear_description: bool,
        #[arg(long, conflicts_with = "deadline")]
        clear_deadline: bool,
    },
    /// Delete a task
    Delete { project: i64, id: i64 },
}

#[derive(Args)]
struct TaskFields {
    #[arg(short, long)]
    description: Option<String>,
    #[arg(short, long)]
    priority: Option<i64>,
    /// Deadline as YYYY-MM-DD
    #[arg(long)]
    deadline: Option<NaiveDate>,
    /// pending, in_progress or completed
    #[arg(short, long)]
    status: Option<TaskStatus>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = TaskHubClient::new(&cli.url);

    match cli.command {
        Commands::Health => print_json(&client.health().await)?,
        Commands::Projects(cmd) => run_project(&client, cmd).await?,
        Commands::Tasks(cmd) => run_task(&client, cmd).await?,
    }

    Ok(())
}

async fn run_project(
    client: &TaskHubClient,
    cmd: ProjectCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ProjectCommands::List => print_json(&client.list_projects().await),
        ProjectCommands::Show { id } => print_json(&client.get_project(id).await),
        ProjectCommands::Create { name, description } => {
            let project = NewProject { name, description };
            print_json(&client.create_project(&project).await)
        }
        ProjectCommands::Update {
            id,
            name,
            description,
            clear_description,
        } => {
            let update = ProjectUpdate {
                name,
                description: optional_clear(description, clear_description),
            };
            print_json(&client.update_project(id, &update).await)
        }
        ProjectCommands::Delete { id } => {
            print_json(&client.delete_project(id).await.map(|()| "deleted"))
        }
    }
}

async fn run_task(
    client: &TaskHubClient,
    cmd: TaskCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        TaskCommands::List { project } => print_json(&client.list_tasks(project).await),
        TaskCommands::Show { project, id } => print_json(&client.get_task(project, id).await),
        TaskCommands::Create {
            project,
            title,
            fields,
        } => {
            let task = NewTask {
                title,
                description: fields.description,
                priority: fields.priority,
                deadline: fields.deadline,
                status: fields.status,
            };
            print_json(&client.create_task(project, &task).await)
        }
        TaskCommands::Update {
            project,
            id,
            title,
            fields,
            clear_description,
            clear_deadline,
        } => {
            let update = TaskUpdate {
                title,
                description: optional_clear(fields.description, clear_description),
                priority: fields.priority,
                deadline: optional_clear(fields.deadline, clear_deadline),
                status: fields.status,
            };
            print_json(&client.update_task(project, id, &update).await)
        }
        TaskCommands::Delete { project, id } => {
            print_json(&client.delete_task(project, id).await.map(|()| "deleted"))
        }
    }
}

/// `--clear-x` wins as an explicit null; otherwise a given value is set.
fn optional_clear<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear {
        Some(None)
    } else {
        value.map(Some)
    }
}

fn print_json<T: Serialize>(
    result: &Result<T, SdkError>,
) -> Result<(), Box<dyn std::error::Error>> {
    match result {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(value)?);
            Ok(())
        }
        Err(SdkError::Api {
            status,
            code,
            message,
        }) => {
            eprintln!("Error: API returned status {status} ({code})");
            eprintln!("Response: {message}");
            std::process::exit(1);
        }
        Err(e) => Err(e.to_string().into()),
    }
}
