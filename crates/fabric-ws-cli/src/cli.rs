//! Command-line surface. Every input can also come from the environment
//! variables a CI workflow exports.

use std::ffi::OsStr;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use fabric_ws_core::config::{self, Config, Credentials};
use fabric_ws_core::models::Environment;
use fabric_ws_core::naming::parse_list;
use fabric_ws_core::WorkspaceError;

/// fabric-ws — create and delete Fabric / Power BI workspaces
#[derive(Parser, Debug)]
#[command(name = "fabric-ws", version, about = "Create and delete Fabric / Power BI workspaces with a service principal")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Print the final report as JSON instead of a text summary
    #[arg(long, global = true)]
    pub json: bool,

    /// Do not load a `.env` file from the working directory
    #[arg(long, global = true)]
    pub no_dotenv: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Whether `--no-dotenv` appears in the raw arguments. Runs before clap, so
/// arguments that are not valid UTF-8 are skipped here and rejected later.
pub fn skip_dotenv<I>(args: I) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<OsStr>,
{
    args.into_iter().any(|a| a.as_ref() == "--no-dotenv")
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create `<base name> <env>` workspaces for the selected environments
    Create(CreateArgs),

    /// Delete workspaces whose names match the given names exactly
    Delete(DeleteArgs),

    /// List workspaces visible to the service principal
    List,
}

/// Service principal and endpoint settings.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Entra ID tenant
    #[arg(long, env = "AZURE_TENANT_ID", global = true)]
    pub tenant_id: Option<String>,

    /// Application (client) id of the service principal
    #[arg(long, env = "AZURE_CLIENT_ID", global = true)]
    pub client_id: Option<String>,

    /// Client secret of the service principal
    #[arg(long, env = "AZURE_CLIENT_SECRET", hide_env_values = true, global = true)]
    pub client_secret: Option<String>,

    /// Identity platform host
    #[arg(long, env = "AZURE_AUTHORITY_HOST", default_value = config::DEFAULT_AUTHORITY_HOST, global = true)]
    pub authority_host: String,

    /// Power BI REST API base URL
    #[arg(long, env = "POWERBI_API_BASE_URL", default_value = config::DEFAULT_API_BASE_URL, global = true)]
    pub api_base_url: String,

    /// OAuth scope requested for the token
    #[arg(long, env = "POWERBI_SCOPE", default_value = config::DEFAULT_SCOPE, global = true)]
    pub scope: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "FABRIC_WS_TIMEOUT_SECS", default_value_t = config::DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,

    /// Page size used when listing workspaces
    #[arg(long, env = "FABRIC_WS_PAGE_SIZE", default_value_t = config::DEFAULT_PAGE_SIZE, global = true)]
    pub page_size: u32,
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Comma-separated base names, e.g. "Sales,Finance"
    #[arg(long, env = "WORKSPACE_NAMES", default_value = "")]
    pub workspace_names: String,

    /// Comma-separated emails granted Admin on each created workspace
    #[arg(long, env = "ADMIN_EMAILS", default_value = "")]
    pub admin_emails: String,

    /// Capacity to assign new workspaces to
    #[arg(long, env = "FABRIC_CAPACITY_ID")]
    pub capacity_id: Option<String>,

    /// Create the DEV workspace (true/1/yes/on)
    #[arg(long, env = "CREATE_DEV", num_args = 0..=1, default_missing_value = "true")]
    pub dev: Option<String>,

    /// Create the UAT workspace (true/1/yes/on)
    #[arg(long, env = "CREATE_UAT", num_args = 0..=1, default_missing_value = "true")]
    pub uat: Option<String>,

    /// Create the PRD workspace (true/1/yes/on)
    #[arg(long, env = "CREATE_PRD", num_args = 0..=1, default_missing_value = "true")]
    pub prd: Option<String>,

    /// Environments as a list instead of flags, e.g. "DEV,PRD"
    #[arg(long, env = "ENVIRONMENTS", value_delimiter = ',')]
    pub environments: Vec<String>,
}

impl CreateArgs {
    pub fn base_names(&self) -> Vec<String> {
        parse_list(&self.workspace_names)
    }

    /// Union of the per-environment flags and `--environments`, canonical order.
    pub fn selected_environments(&self) -> Result<Vec<Environment>, WorkspaceError> {
        let flag = |v: &Option<String>| v.as_deref().is_some_and(config::parse_flag);
        let mut envs = config::selected_environments(flag(&self.dev), flag(&self.uat), flag(&self.prd));

        for raw in self.environments.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            let env = Environment::parse(raw).ok_or_else(|| {
                WorkspaceError::Validation(format!(
                    "unknown environment '{}' (expected DEV, UAT or PRD)",
                    raw
                ))
            })?;
            envs.push(env);
        }
        envs.sort();
        envs.dedup();
        Ok(envs)
    }
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// Comma-separated exact workspace names, e.g. "sandbox dev,sandbox uat"
    #[arg(long, env = "WORKSPACES_TO_DELETE", default_value = "")]
    pub workspaces: String,
}

impl ConnectionArgs {
    /// Build the run configuration; reports every missing credential at once.
    pub fn to_config(&self) -> Result<Config, WorkspaceError> {
        let credentials = Credentials::from_parts(
            self.tenant_id.clone(),
            self.client_id.clone(),
            self.client_secret.clone(),
        )?;
        Ok(Config::new(credentials)
            .with_authority_host(self.authority_host.clone())
            .with_api_base_url(self.api_base_url.clone())
            .with_scope(self.scope.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs.max(1)))
            .with_page_size(self.page_size))
    }
}
