use crate::cli::output::Output;
use crate::cli::{
    AdminCommands, CategoryCommands, Cli, Commands, JobCommands, SortArg, WorkerCommands,
};
use crate::config::Config;
use crate::jobs::completion::ProofFile;
use crate::models::user::Role;
use crate::routing::{AdminRoute, Guard, Route};
use crate::session::AppKind;
use crate::views::admin::{
    CategoriesPage, DashboardView, DisputesPage, JobsPage, UsersPage, WorkerVerificationPage,
};
use crate::views::client_dashboard::{ClientDashboard, JobForm};
use crate::views::worker_dashboard::{JobFilters, SortBy, SortOrder, WorkerDashboard};
use crate::AppState;
use anyhow::{bail, Context};
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let out = Output::new(cli.json);
    match cli.command {
        Commands::Login { email, password } => {
            let state = open(config, AppKind::Main)?;
            let user = state.auth.login(&email, &password).await?;
            out.success(&format!("Signed in as {} ({})", user.name, user.role));
        }
        Commands::SendOtp { phone } => {
            let state = open(config, AppKind::Main)?;
            match state.auth.send_otp(&phone).await? {
                Some(code) => out.success(&format!("OTP sent (development code: {})", code)),
                None => out.success("OTP sent"),
            }
        }
        Commands::VerifyOtp { phone, otp } => {
            let state = open(config, AppKind::Main)?;
            let user = state.auth.verify_otp(&phone, &otp).await?;
            out.success(&format!("Signed in as {} ({})", user.name, user.role));
        }
        Commands::Logout => {
            open(config, AppKind::Main)?.auth.logout()?;
            out.success("Signed out");
        }
        Commands::Whoami => {
            let state = open(config, AppKind::Main)?;
            let session = state.auth.session();
            match session.user {
                Some(user) => out.emit(&user, |u| {
                    println!("  #{} {} ({})", u.id, u.name, u.role);
                })?,
                None if session.token.is_some() => out.success("Signed in (no stored profile)"),
                None => out.warning("Not signed in"),
            }
        }
        Commands::Jobs(cmd) => {
            let state = open(config, AppKind::Main)?;
            run_jobs(&state, &out, cmd).await?;
        }
        Commands::Admin(cmd) => {
            let state = open(config, AppKind::Admin)?;
            run_admin(&state, &out, cmd).await?;
        }
    }
    Ok(())
}

/// Builds the app state and restores the persisted session for `kind`.
fn open(config: Config, kind: AppKind) -> anyhow::Result<AppState> {
    let state = AppState::new(config, kind)?;
    state.auth.restore().context("Failed to restore session")?;
    Ok(state)
}

fn enter(state: &AppState, route: Route) -> anyhow::Result<()> {
    match route.check(state.auth.current_role()) {
        Guard::Allow => Ok(()),
        Guard::RedirectTo(to) => bail!("{} is not available here, redirected to {}", route.path(), to),
    }
}

fn enter_admin(state: &AppState, path: &str) -> anyhow::Result<AdminRoute> {
    match AdminRoute::resolve(path, state.auth.is_authenticated()) {
        AdminRoute::Login => bail!("Admin login required (gigfinder admin login)"),
        route => Ok(route),
    }
}

/// Disposes the page when the user presses Ctrl-C.
fn cancel_on_interrupt(handle: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling in-flight requests");
            handle.cancel();
        }
    });
}

async fn run_jobs(state: &AppState, out: &Output, cmd: JobCommands) -> anyhow::Result<()> {
    match cmd {
        JobCommands::Mine => {
            if state.auth.current_role() == Some(Role::Worker) {
                enter(state, Route::Worker)?;
                let mut page = WorkerDashboard::new(state);
                cancel_on_interrupt(page.scope().handle());
                page.load().await?;
                out.jobs(&page.my_jobs)?;
            } else {
                enter(state, Route::Client)?;
                let mut page = ClientDashboard::new(state);
                cancel_on_interrupt(page.scope().handle());
                page.load().await?;
                out.jobs(&page.jobs)?;
            }
        }
        JobCommands::Nearby {
            category,
            min_budget,
            max_budget,
            sort,
            asc,
        } => {
            enter(state, Route::Worker)?;
            let mut page = WorkerDashboard::new(state);
            cancel_on_interrupt(page.scope().handle());
            page.load().await?;
            page.filters = JobFilters {
                category,
                min_budget,
                max_budget,
                sort_by: match sort {
                    SortArg::Relevance => SortBy::Relevance,
                    SortArg::Budget => SortBy::Budget,
                    SortArg::Date => SortBy::Date,
                },
                order: if asc { SortOrder::Asc } else { SortOrder::Desc },
            };
            out.jobs(&page.filtered_nearby())?;
        }
        JobCommands::Categories => {
            enter(state, Route::Services)?;
            let catalog = state.job_service.categories().await?;
            out.emit(&catalog, |catalog| {
                for (group, titles) in catalog.iter() {
                    println!("  {}", group);
                    for title in titles {
                        println!("    - {}", title);
                    }
                }
            })?;
        }
        JobCommands::Post {
            title,
            catalog,
            description,
            category_id,
            budget,
            address,
        } => {
            enter(state, Route::Client)?;
            let mut page = ClientDashboard::new(state);
            cancel_on_interrupt(page.scope().handle());
            let form = JobForm {
                title: title.unwrap_or_default(),
                description: description.unwrap_or_default(),
                category_id,
                budget,
                address: address.unwrap_or_default(),
                selected_category: catalog,
                custom_job: None,
            };
            let job = page.post_job(&form).await?;
            out.jobs(std::slice::from_ref(job))?;
        }
        JobCommands::Accept { id } => {
            let mut page = worker_page(state).await?;
            page.accept(id).await?;
            out.success(&format!("Job #{} accepted", id));
        }
        JobCommands::OnTheWay { id } => {
            let mut page = worker_page(state).await?;
            page.on_the_way(id).await?;
            out.success(&format!("Marked on the way to job #{}", id));
        }
        JobCommands::Start { id } => {
            let mut page = worker_page(state).await?;
            page.start(id).await?;
            out.success(&format!("Job #{} started", id));
        }
        JobCommands::Complete {
            id,
            proof,
            phone,
            otp,
        } => {
            let mut page = worker_page(state).await?;
            let proof = ProofFile::from_path(&proof)
                .await
                .with_context(|| format!("Failed to read {}", proof.display()))?;
            page.begin_completion(id)?;
            page.verify_completion(proof, &phone, &otp).await?;
            out.success("Proof uploaded and OTP verified");
            page.finish_completion().await?;
            out.success(&format!("Job #{} completed", id));
        }
    }
    Ok(())
}

async fn worker_page(state: &AppState) -> anyhow::Result<WorkerDashboard> {
    enter(state, Route::Worker)?;
    let mut page = WorkerDashboard::new(state);
    cancel_on_interrupt(page.scope().handle());
    page.load().await?;
    Ok(page)
}

async fn run_admin(state: &AppState, out: &Output, cmd: AdminCommands) -> anyhow::Result<()> {
    match cmd {
        AdminCommands::Login { email, password } => {
            state.auth.admin_login(&email, &password).await?;
            out.success("Admin signed in");
        }
        AdminCommands::Logout => {
            state.auth.logout()?;
            out.success("Admin signed out");
        }
        AdminCommands::Dashboard => {
            enter_admin(state, AdminRoute::Dashboard.path())?;
            let mut page = DashboardView::new(state);
            cancel_on_interrupt(page.scope().handle());
            let fetched = page.load().await?;
            if let crate::services::dashboard_service::Fetched::Degraded { cause, .. } = fetched {
                out.warning(&format!("Showing placeholder numbers: {}", cause));
            }
            out.emit(fetched.data(), |d| {
                println!("  Total jobs:            {}", d.stats.total_jobs);
                println!("  Users:                 {}", d.stats.total_users);
                println!("  Workers:               {}", d.stats.total_workers);
                println!("  Verified workers:      {}", d.stats.verified_workers);
                println!("  Pending verifications: {}", d.pending_verifications);
                if let Some(revenue) = d.total_revenue {
                    println!("  Revenue:               ₹{}", revenue);
                }
                if let Some(active) = d.active_jobs {
                    println!("  Active jobs:           {}", active);
                }
                for p in &d.heatmap {
                    println!("  ({:.4}, {:.4}) x{}", p.lat, p.lng, p.count);
                }
            })?;
        }
        AdminCommands::Users => {
            enter_admin(state, AdminRoute::Users.path())?;
            let mut page = UsersPage::new(state);
            cancel_on_interrupt(page.scope().handle());
            page.load().await?;
            print_users(out, &page)?;
        }
        AdminCommands::Ban { id } => {
            enter_admin(state, AdminRoute::Users.path())?;
            let mut page = UsersPage::new(state);
            page.ban(id).await?;
            out.success(&format!("User #{} banned", id));
        }
        AdminCommands::Unban { id } => {
            enter_admin(state, AdminRoute::Users.path())?;
            let mut page = UsersPage::new(state);
            page.unban(id).await?;
            out.success(&format!("User #{} unbanned", id));
        }
        AdminCommands::Categories(cmd) => {
            enter_admin(state, AdminRoute::Categories.path())?;
            let mut page = CategoriesPage::new(state);
            cancel_on_interrupt(page.scope().handle());
            match cmd {
                CategoryCommands::List => page.load().await?,
                CategoryCommands::Add { name } => page.create(&name).await?,
                CategoryCommands::Rename { id, name } => page.rename(id, &name).await?,
                CategoryCommands::Delete { id } => page.delete(id).await?,
            }
            out.emit(&page.categories, |categories| {
                for c in categories {
                    println!("  #{:<5} {}", c.id, c.name);
                }
            })?;
        }
        AdminCommands::Jobs => {
            enter_admin(state, AdminRoute::Jobs.path())?;
            let mut page = JobsPage::new(state);
            cancel_on_interrupt(page.scope().handle());
            page.load().await?;
            out.jobs(&page.jobs)?;
        }
        AdminCommands::Reassign { job_id, worker } => {
            enter_admin(state, AdminRoute::Jobs.path())?;
            let mut page = JobsPage::new(state);
            cancel_on_interrupt(page.scope().handle());
            page.load().await?;
            page.select_worker(job_id, worker)?;
            if page.reassign(job_id).await? {
                out.success(&format!("Job #{} reassigned", job_id));
            } else {
                out.warning("No worker selected, nothing to do");
            }
        }
        AdminCommands::Disputes => {
            enter_admin(state, AdminRoute::Disputes.path())?;
            let mut page = DisputesPage::new(state);
            cancel_on_interrupt(page.scope().handle());
            page.load().await?;
            out.emit(&page.reports, |reports| {
                for r in reports {
                    println!("  #{:<5} {:<10} {:<20} {}", r.id, r.status, r.reported_user, r.reason);
                }
            })?;
        }
        AdminCommands::Workers(cmd) => {
            enter_admin(state, AdminRoute::Workers.path())?;
            run_workers(state, out, cmd).await?;
        }
    }
    Ok(())
}

async fn run_workers(state: &AppState, out: &Output, cmd: WorkerCommands) -> anyhow::Result<()> {
    let mut page = WorkerVerificationPage::new(state);
    cancel_on_interrupt(page.scope().handle());
    match cmd {
        WorkerCommands::Pending => page.load().await?,
        WorkerCommands::Approve { id } => {
            page.approve(id).await?;
            out.success(&format!("Worker #{} approved", id));
        }
        WorkerCommands::Reject { id, reason } => {
            page.reject(id, reason).await?;
            out.success(&format!("Worker #{} rejected", id));
        }
        WorkerCommands::Verified => {
            let workers = state.admin_service.verified_workers().await?;
            return out.emit(&workers, |workers| {
                for w in workers {
                    println!("  #{:<5} {} {}", w.id, w.name, w.phone.as_deref().unwrap_or(""));
                }
            });
        }
        WorkerCommands::Leaderboard => {
            let entries = state.admin_service.leaderboard().await?;
            return out.emit(&entries, |entries| {
                for e in entries {
                    let rating = e.rating_avg.map(|r| r.to_string()).unwrap_or_else(|| "-".into());
                    println!("  #{:<5} {:>5}", e.id, rating);
                }
            });
        }
    }
    out.emit(&page.pending, |pending| {
        for w in pending {
            println!(
                "  #{:<5} {:<24} {:<10} {} document(s)",
                w.id,
                w.name,
                w.verification_status,
                w.documents.len()
            );
        }
    })
}

fn print_users(out: &Output, page: &UsersPage) -> anyhow::Result<()> {
    out.emit(&page.users, |users| {
        for u in users {
            println!(
                "  #{:<5} {:<24} {:<7} {}",
                u.id,
                u.name,
                u.role.as_str(),
                if u.is_banned() { "BANNED" } else { "" }
            );
        }
    })
}
