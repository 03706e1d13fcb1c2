//! Builder for an order board over an export file.

use std::path::{Path, PathBuf};

use super::{export::ExportBackend, OrderBoard};
use crate::{
    error::{DashboardError, Result},
    session::{Role, Session},
};

/// Builder for creating and configuring a loaded [`OrderBoard`].
#[derive(Debug, Clone)]
pub struct DashboardBuilder {
    orders_path: Option<PathBuf>,
    session: Option<Session>,
}

impl DashboardBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            orders_path: None,
            session: None,
        }
    }

    /// Sets the order export to read.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/valveflow/orders.json` or
    /// `~/.local/share/valveflow/orders.json`
    pub fn with_orders_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.orders_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the session the board acts for. Defaults to an admin session
    /// without a token.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Reads the export and loads every stage the session may view.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::XdgDirectory` if the default path cannot be
    /// resolved
    /// Returns `DashboardError::FileSystem` or `DashboardError::Serialization`
    /// if the export cannot be read
    pub async fn build(self) -> Result<OrderBoard<ExportBackend>> {
        let orders_path = match self.orders_path {
            Some(path) => path,
            None => Self::default_orders_path()?,
        };

        let backend = ExportBackend::open(orders_path).await?;
        let session = self
            .session
            .unwrap_or_else(|| Session::new(String::new(), Role::Admin));

        let board = OrderBoard::new(backend, session);
        board.load_all_stages().await?;
        Ok(board)
    }

    /// Returns the default export path following XDG Base Directory
    /// specification.
    fn default_orders_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("valveflow")
            .place_data_file("orders.json")
            .map_err(|e| DashboardError::XdgDirectory(e.to_string()))
    }
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}
