use std::sync::Arc;

use algotrek_auth::{AdminHintCache, AuthError, Metadata, Requirement, Role, SessionStore, StoreConfig, check_access};
use tracing_subscriber::EnvFilter;

fn report<T>(step: &str, result: &Result<T, AuthError>) {
    match result {
        Ok(_) => tracing::info!(step, "ok"),
        Err(e) => tracing::info!(step, code = e.code(), message = %e, "rejected"),
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let role = match std::env::args().nth(1).map(|raw| raw.parse::<Role>()).transpose() {
        Ok(role) => role.unwrap_or(Role::User),
        Err(e) => {
            tracing::error!(error = %e, "usage: algotrek-auth [admin|user]");
            std::process::exit(2);
        }
    };

    let config = StoreConfig::from_env().expect("invalid store config");
    let store = Arc::new(SessionStore::new(&config).expect("session store init failed"));

    if let Some(path) = &config.admin_hint_path {
        let cache = AdminHintCache::new(path.clone(), config.admin.email.clone());
        tracing::info!(hinted = cache.is_admin_hinted(), path = %path.display(), "admin hint loaded");
        cache.attach(&store);
    }

    let (subscription, mut events) = store.subscribe_channel();
    let watcher = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            let email = event.session().map(|s| s.email().to_owned());
            tracing::info!(event = event.name(), ?email, "session changed");
        }
    });

    let first = match role {
        Role::Admin => format!("ops@{}", config.admin_domain),
        Role::User => "user@x.com".to_owned(),
    };
    let result = store.register(&first, "pw123456", role, Metadata::new());
    report("register first account", &result);
    let result = store.register("user2@x.com", "pw123456", Role::User, Metadata::new());
    report("register user2@x.com", &result);
    let result = store.authenticate(&config.admin.email, &config.admin.password);
    report("authenticate admin", &result);

    let session = store.current_session();
    let access = check_access(session.as_ref(), Requirement::Role(Role::Admin));
    tracing::info!(?access, "admin dashboard access");

    match store.list_accounts() {
        Ok(accounts) => {
            tracing::info!(total = store.account_count(), "account directory");
            for principal in accounts {
                tracing::info!(email = %principal.email, role = %principal.role, "account");
            }
        }
        Err(e) => tracing::warn!(error = %e, "account listing failed"),
    }

    store.deauthenticate();

    store.unsubscribe(subscription);
    if let Err(e) = watcher.await {
        tracing::error!(error = %e, "event watcher failed");
    }
}
