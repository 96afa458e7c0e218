use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use painel::engine::{catalog, helpers};
use painel::engine::poller::PollOutcome;
use painel::models::{OrderRequest, ProfileUpdate};
use painel::notify::ConsoleNotifier;
use painel::{views, ClientConfig, Panel, PanelError};

mod opt;

use opt::{AdminCommand, PainelCommand, PainelOpt};

// ========================================
// Entry-point
// ========================================
#[tokio::main]
async fn main() -> ExitCode {
    let opt = PainelOpt::parse();

    // Tracing / logging
    let default_filter = if opt.verbose { "painel=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(opt).await {
        Ok(()) => ExitCode::SUCCESS,
        // Falhas do painel já viraram toast
        Err(e) if e.is::<PanelError>() => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("[erro] {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(opt: PainelOpt) -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = opt.api_url {
        config.api_url = url.trim().trim_end_matches('/').to_string();
    }
    if opt.session.username.is_some() {
        config.username = opt.session.username;
    }
    if opt.session.password.is_some() {
        config.password = opt.session.password;
    }

    let mut panel = Panel::new(&config, Arc::new(ConsoleNotifier))
        .map_err(|e| anyhow::anyhow!("falha ao iniciar o cliente HTTP: {}", e))?;
    tracing::debug!("API em {}", panel.client().base_url());

    match opt.command {
        PainelCommand::Health => {
            let health = panel
                .client()
                .health()
                .await
                .map_err(|e| anyhow::anyhow!(e.toast_message("API indisponível")))?;
            println!("API: {}", health.status);
        }
        PainelCommand::Register {
            username,
            email,
            password,
        } => {
            panel.register(&username, &email, &password).await?;
        }
        command => {
            login(&mut panel, &config).await?;
            run_session(&mut panel, command).await?;
        }
    }
    Ok(())
}

/// A sessão não sobrevive entre execuções: cada comando faz login
async fn login(panel: &mut Panel, config: &ClientConfig) -> anyhow::Result<()> {
    match config.credentials() {
        Some((user, pass)) => {
            panel.login(&user, &pass).await?;
        }
        None => {
            if !panel.check_auth().await {
                anyhow::bail!("informe --user/--pass ou PAINEL_USER/PAINEL_PASS");
            }
        }
    }
    Ok(())
}

async fn run_session(panel: &mut Panel, command: PainelCommand) -> anyhow::Result<()> {
    match command {
        PainelCommand::Dashboard => {
            let stats = panel.load_dashboard().await?;
            if let Some(user) = &panel.state().user {
                println!("{}\n", views::user_line(user));
            }
            print!("{}", views::dashboard(&stats, panel.recent_orders()));
        }
        PainelCommand::Services { search, category } => {
            panel.load_services().await?;
            let state = panel.state();
            let found = catalog::filter_services(&state.services, &search, category.as_deref());
            print!("{}", views::services(&found));
        }
        PainelCommand::Orders { page } => {
            panel.load_orders(page).await?;
            print!("{}", views::orders(&panel.state().orders));
        }
        PainelCommand::Order {
            service_id,
            link,
            quantity,
            comments,
        } => {
            panel.load_services().await?;
            if let Some(service) = catalog::find_service(&panel.state().services, service_id) {
                println!("{}", views::order_estimate(service, quantity));
            }
            let order = panel
                .create_order(OrderRequest {
                    service_id,
                    link,
                    quantity,
                    comments,
                })
                .await?;
            print!("{}", views::orders(std::slice::from_ref(&order)));
        }
        PainelCommand::RefreshOrder { order_id } => {
            let order = panel.refresh_order_status(order_id).await?;
            print!("{}", views::orders(std::slice::from_ref(&order)));
        }
        PainelCommand::SyncOrders => {
            panel.sync_orders().await?;
            print!("{}", views::orders(&panel.state().orders));
        }
        PainelCommand::Payments => {
            let payments = panel.load_payments().await?;
            print!("{}", views::payments(&payments));
        }
        PainelCommand::Pay { amount, qr_out } => pay(panel, &amount, qr_out).await?,
        PainelCommand::CheckPayment { payment_id } => {
            let check = panel.check_payment(payment_id).await?;
            println!("{}", views::payment_status_line(Some(&check.status)));
        }
        PainelCommand::Profile { email, password } => {
            if email.is_some() || password.is_some() {
                panel.update_profile(ProfileUpdate { email, password }).await?;
            }
            if let Some(user) = &panel.state().user {
                println!("{}", views::user_line(user));
            }
        }
        PainelCommand::Admin(admin) => run_admin(panel, admin).await?,
        PainelCommand::Health | PainelCommand::Register { .. } => {}
    }
    Ok(())
}

// ========================================
// Recarga PIX
// ========================================
async fn pay(
    panel: &mut Panel,
    amount: &str,
    qr_out: Option<std::path::PathBuf>,
) -> anyhow::Result<()> {
    let pending = panel.add_balance(amount).await?;
    print!("{}", views::payment_modal(&pending, None));

    if let Some(path) = qr_out {
        let encoded = pending
            .pix_info
            .as_ref()
            .map(|pix| pix.qr_code_base64.as_str())
            .unwrap_or_default();
        let png = helpers::decode_qr_png(encoded).map_err(anyhow::Error::msg)?;
        tokio::fs::write(&path, png)
            .await
            .with_context(|| format!("falha ao gravar {}", path.display()))?;
        println!("QR Code salvo em {}", path.display());
    }

    // Mostra cada mudança de status enquanto o timer roda
    let printer = panel.modal().handle().map(|handle| {
        let mut rx = handle.subscribe();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let line = rx
                    .borrow_and_update()
                    .as_ref()
                    .map(|check| views::payment_status_line(Some(&check.status)));
                if let Some(line) = line {
                    println!("{}", line);
                }
            }
        })
    });

    let outcome = tokio::select! {
        outcome = panel.wait_payment() => outcome,
        _ = tokio::signal::ctrl_c() => None,
    };
    if let Some(printer) = printer {
        printer.abort();
    }

    match outcome {
        Some(approved @ PollOutcome::Approved { .. }) => {
            panel.settle_payment(approved).await;
            if let Some(balance) = panel.state().balance() {
                println!("Saldo atual: {}", helpers::format_brl(balance));
            }
        }
        Some(PollOutcome::Expired { attempts }) => {
            panel.close_payment_modal();
            println!(
                "Pagamento {} ainda pendente após {} verificações",
                pending.payment_id, attempts
            );
        }
        Some(PollOutcome::Cancelled) | None => {
            panel.close_payment_modal();
            println!("Modal fechado. Pagamento {} segue pendente.", pending.payment_id);
        }
    }
    Ok(())
}

// ========================================
// Admin
// ========================================
async fn run_admin(panel: &mut Panel, command: AdminCommand) -> anyhow::Result<()> {
    match command {
        AdminCommand::Config => {
            let config = panel.load_admin_config().await?;
            print!("{}", views::admin_config(&config));
        }
        AdminCommand::SetConfig { key, value } => {
            let value = Some(value).filter(|v| !v.is_empty());
            panel.set_admin_config(&key, value).await?;
        }
        AdminCommand::TestBarato => {
            panel.test_barato_api().await?;
        }
        AdminCommand::TestMercadoPago => {
            panel.test_mercado_pago().await?;
        }
        AdminCommand::Users => {
            let users = panel.load_users().await?;
            print!("{}", views::users(&users));
        }
        AdminCommand::Stats => {
            let stats = panel.load_admin_stats().await?;
            print!("{}", views::admin_stats(&stats));
        }
        AdminCommand::Payments { page, status } => {
            let page = panel.load_admin_payments(page, status.as_deref()).await?;
            print!("{}", views::payments(&page.payments));
            println!("Página {} de {} ({} no total)", page.current_page, page.pages, page.total);
        }
        AdminCommand::Approve { payment_id } => {
            panel.approve_payment(payment_id).await?;
        }
        AdminCommand::Reject { payment_id } => {
            panel.reject_payment(payment_id).await?;
        }
        AdminCommand::SyncServices => {
            panel.sync_services().await?;
        }
    }
    Ok(())
}
