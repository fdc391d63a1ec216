//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services built over ports and remain testable without
//! I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    PasswordHasher, RecordRepository, SessionStore, SiteSettingsRepository, UserRepository,
};
use crate::domain::{
    AiProduct, AiProductService, ReportingService, SessionManager, SiteSettingsService,
    UserAccountService,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UserRepository>,
    pub ai_products: Arc<dyn RecordRepository<AiProduct>>,
    pub site_settings: Arc<dyn SiteSettingsRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub clock: Arc<dyn Clock>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<UserAccountService>,
    pub sessions: SessionManager,
    pub ai_products: AiProductService,
    pub site_settings: SiteSettingsService,
    pub reporting: ReportingService,
}

impl HttpState {
    /// Wire the domain services over the supplied ports.
    ///
    /// The session manager loads users through the same account service the
    /// handlers use.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users,
            ai_products,
            site_settings,
            sessions,
            hasher,
            clock,
        } = ports;

        let accounts = Arc::new(UserAccountService::new(Arc::clone(&users), hasher));
        let sessions = SessionManager::new(sessions, accounts.clone(), clock);
        Self {
            accounts,
            sessions,
            ai_products: AiProductService::new(ai_products),
            site_settings: SiteSettingsService::new(site_settings),
            reporting: ReportingService::new(users),
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
