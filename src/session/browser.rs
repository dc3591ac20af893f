//! Headless Chromium session
//!
//! Launches one browser with one tab and drives it through the Chrome
//! DevTools Protocol. The CDP event handler runs on its own task for the
//! lifetime of the session and is aborted on close.

use crate::config::BrowserConfig;
use crate::session::{PageSession, SessionError};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as LaunchConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Interval between element probes while waiting for a selector
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A live browser tab owned by one crawl
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    navigation_timeout: Duration,
    closed: bool,
}

impl BrowserSession {
    /// Launches the browser and opens a blank tab
    ///
    /// # Arguments
    ///
    /// * `config` - Browser launch options
    /// * `navigation_timeout` - Upper bound for each `navigate` call
    pub async fn launch(
        config: &BrowserConfig,
        navigation_timeout: Duration,
    ) -> Result<Self, SessionError> {
        let mut builder = LaunchConfig::builder()
            .window_size(1366, 768)
            .args(config.args.clone());

        if let Some(executable) = &config.executable {
            builder = builder.chrome_executable(executable);
        }
        if !config.headless {
            builder = builder.with_head();
        }
        if config.no_sandbox {
            builder = builder.no_sandbox();
        }

        let launch_config = builder.build().map_err(SessionError::Launch)?;

        let (browser, mut handler) = Browser::launch(launch_config)
            .await
            .map_err(|e| SessionError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler error (continuing): {}", e);
                }
            }
            tracing::debug!("CDP handler task completed");
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(SessionError::Launch(format!("failed to open tab: {}", e)));
            }
        };

        tracing::info!("Browser session started");

        Ok(Self {
            browser,
            page,
            handler_task,
            navigation_timeout,
            closed: false,
        })
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.closed {
            Err(SessionError::Closed)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PageSession for BrowserSession {
    async fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        self.ensure_open()?;
        tracing::debug!("Navigating to {}", url);

        match tokio::time::timeout(self.navigation_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(SessionError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            }),
            Err(_) => Err(SessionError::Navigation {
                url: url.to_string(),
                message: format!("timed out after {:?}", self.navigation_timeout),
            }),
        }
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), SessionError> {
        self.ensure_open()?;
        let deadline = Instant::now() + timeout;

        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(SessionError::Timeout {
                    selector: selector.to_string(),
                    waited: timeout,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn content(&mut self) -> Result<String, SessionError> {
        self.ensure_open()?;
        self.page
            .content()
            .await
            .map_err(|e| SessionError::Driver(e.to_string()))
    }

    async fn click(&mut self, selector: &str) -> Result<(), SessionError> {
        self.ensure_open()?;
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| SessionError::ElementNotFound {
                selector: selector.to_string(),
            })?;

        element
            .click()
            .await
            .map_err(|e| SessionError::Interaction(e.to_string()))?;
        Ok(())
    }

    async fn query_selector(&mut self, selector: &str) -> Result<bool, SessionError> {
        self.ensure_open()?;
        Ok(self.page.find_element(selector).await.is_ok())
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let result = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| SessionError::Driver(e.to_string()));

        if let Err(e) = self.browser.wait().await {
            tracing::debug!("Browser process wait failed (ignored): {}", e);
        }
        self.handler_task.abort();

        tracing::info!("Browser session closed");
        result
    }
}
