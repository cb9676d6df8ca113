//! Walks a visitor, a member and an admin through the guarded routes
//! using the in-memory backends.
//!
//! ```text
//! cargo run -p guard-walkthrough [config.json]
//! RUST_LOG=debug cargo run -p guard-walkthrough
//! ```

use std::sync::Arc;

use sociallens::prelude::*;
use sociallens::telemetry;

const PATHS: [&str; 6] = ["/", "/explore?q=sunsets", "/login", "/admin", "/admin/login", "/nope"];

#[tokio::main]
async fn main() -> Result<(), SocialLensError> {
    telemetry::init("info");

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };

    // Backend: one admin on the allow-list, one regular member.
    let auth = Arc::new(MemoryAuth::new());
    let store = MemoryStore::new();
    let admin = auth.register_with_roles("root@sociallens.app", "hunter22", ["admin"]);
    auth.register("maya@sociallens.app", "pa55word");
    store.insert("admins", Document::new(admin.uid.as_str()).with_field("grantedBy", "setup"));

    let policy = Arc::new(config.admin.build(store));
    let app = AppBuilder::new().config(config).build(auth, policy)?;

    report(&app, "before the first auth event")?;

    app.settled().await;
    report(&app, "signed out")?;

    app.sign_in("maya@sociallens.app", "pa55word").await?;
    app.settled().await;
    report(&app, "member")?;

    match app.admin_sign_in("maya@sociallens.app", "pa55word").await {
        Err(SocialLensError::AccessDenied(uid)) => {
            println!("admin portal refused {uid}, session signed out");
        }
        other => tracing::warn!(?other, "unexpected admin portal result"),
    }

    app.admin_sign_in("root@sociallens.app", "hunter22").await?;
    app.settled().await;
    report(&app, "admin")?;

    app.sign_out().await?;
    app.shutdown().await;
    Ok(())
}

fn report<A: AuthService, P: AdminPolicy>(
    app: &App<A, P>,
    label: &str,
) -> Result<(), SocialLensError> {
    let session = app.session();
    let who = session
        .identity()
        .and_then(|i| i.email.clone())
        .unwrap_or_else(|| "-".into());
    println!(
        "\n== {label} (loading: {}, account: {who}, admin: {:?})",
        session.is_loading(),
        app.admin_status()
    );

    for path in PATHS {
        let nav = app.navigate(path)?;
        let via: Vec<String> = nav.redirects.iter().map(|r| r.to_string()).collect();
        let shown = match nav.view {
            View::Page(route) => format!("page {route}"),
            View::Placeholder(route) => format!("placeholder at {route}"),
        };
        if via.is_empty() {
            println!("  {path:<22} -> {shown}");
        } else {
            println!("  {path:<22} -> {shown} (via {})", via.join(" -> "));
        }
    }
    Ok(())
}
