use anyhow::bail;
use clap::Subcommand;
use jobboard_client::{
    api::JobBoardApi,
    form::{FormField, PostJobForm},
    listing::{JobCard, JobsPage, JobsView},
    toast::{Toast, ToastKind, ToastQueue},
};
use jobboard_config::Config;
use jobboard_shared_contracts::time::TimeService;
use tracing::debug;

use crate::environment::{self, Time};

#[derive(Debug, Subcommand)]
pub enum JobsCommand {
    /// List job postings
    #[command(aliases(["ls", "l"]))]
    List {
        /// Only show jobs whose title, company or description contain this
        /// term (case insensitive)
        #[arg(short, long, default_value = "")]
        search: String,
        /// Only show jobs whose location contains this term (case
        /// insensitive)
        #[arg(short, long, default_value = "")]
        location: String,
    },
    /// Post a new job
    #[command(aliases(["p"]))]
    Post {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        company: String,
        #[arg(long, default_value = "")]
        location: String,
        /// Yearly salary, digits only
        #[arg(long, default_value = "")]
        salary: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

impl JobsCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let api = environment::JobBoardApi::new(config.client.api_url)?;

        match self {
            JobsCommand::List { search, location } => list(&api, search, location).await,
            JobsCommand::Post {
                title,
                company,
                location,
                salary,
                description,
            } => {
                let mut toasts = ToastQueue::new(*config.client.toast_ttl);
                let fields = [
                    (FormField::Title, title),
                    (FormField::Company, company),
                    (FormField::Location, location),
                    (FormField::Salary, salary),
                    (FormField::Description, description),
                ];
                post(&api, &Time::default(), &mut toasts, fields).await
            }
        }
    }
}

async fn list(api: &impl JobBoardApi, search: String, location: String) -> anyhow::Result<()> {
    let mut page = JobsPage::new();
    page.mount(api).await;
    page.on_search_change(search);
    page.on_location_change(location);

    match page.render() {
        JobsView::Error(error) => bail!(error),
        view => print!("{view}"),
    }

    Ok(())
}

async fn post(
    api: &impl JobBoardApi,
    time: &impl TimeService,
    toasts: &mut ToastQueue,
    fields: [(FormField, String); 5],
) -> anyhow::Result<()> {
    let mut form = PostJobForm::new();
    for (field, value) in fields {
        if !form.on_change(field, value) {
            bail!("The salary must only consist of digits");
        }
    }

    let job = form.submit(api, toasts, time.now()).await;

    // the request may have outlived the toast ttl
    let now = time.now();
    let expired = toasts.prune(now);
    form.tick(now);
    debug!(expired = expired.len(), success = form.success(), "job form settled");

    toasts.active().iter().for_each(print_toast);

    match job {
        Some(job) => {
            print!("{}", JobsView::Cards(vec![JobCard::from(&job)]));
            Ok(())
        }
        None => bail!("Job was not posted"),
    }
}

fn print_toast(toast: &Toast) {
    let kind = match toast.kind {
        ToastKind::Success => "success",
        ToastKind::Error => "error",
    };
    println!("[{kind}] {}", toast.message);
}
