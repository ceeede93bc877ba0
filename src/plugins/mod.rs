pub mod server;

use std::sync::Arc;

use anyhow::Context;

use crate::state::AppState;

/// A unit of the running service, started once at boot.
#[async_trait::async_trait]
pub trait Plugin: Send + Sync {
  fn name(&self) -> &'static str {
    std::any::type_name::<Self>()
  }

  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()>;
}

pub struct App {
  plugins: Vec<Box<dyn Plugin>>,
}

impl App {
  pub fn new() -> Self {
    Self { plugins: Vec::new() }
  }

  pub fn register<P: Plugin + 'static>(mut self, plugin: P) -> Self {
    self.plugins.push(Box::new(plugin));
    self
  }

  /// Starts every plugin in registration order. A plugin that cannot
  /// start aborts the rest, so the process never runs half-configured.
  pub async fn run(self, app: Arc<AppState>) -> anyhow::Result<()> {
    for plugin in self.plugins {
      let name = plugin.name();
      tracing::info!("init `{}`", name);

      plugin
        .start(app.clone())
        .await
        .with_context(|| format!("failed to start `{name}`"))?;
    }
    Ok(())
  }
}
