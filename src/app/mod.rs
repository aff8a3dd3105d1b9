//! UI controller
//!
//! 表单 + 两个按钮（连接钱包 / 执行 Swap）+ 一行状态。所有错误都在这里被捕获并转成状态文本，
//! 控制器在任何失败之后仍然可用。同一时间只允许一个 swap/quote 流程。

pub mod command;
pub mod form;

pub use command::Command;
pub use form::SwapForm;

use crate::common::{StatusBoard, SwapError};
use crate::trading::{Quote, SwapOutcome};
use crate::SwapClient;
use alloy::primitives::Address;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, warn};

/// Held while a flow runs, releases the flag on every exit path
struct FlightGuard<'a>(&'a AtomicBool);

impl<'a> FlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).ok()?;
        Some(Self(flag))
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct SwapApp {
    client: SwapClient,
    form: Mutex<SwapForm>,
    in_flight: AtomicBool,
}

impl SwapApp {
    pub fn new(client: SwapClient) -> Self {
        Self { client, form: Mutex::new(SwapForm::default()), in_flight: AtomicBool::new(false) }
    }

    pub fn client(&self) -> &SwapClient {
        &self.client
    }

    pub fn status(&self) -> &StatusBoard {
        self.client.status()
    }

    pub fn account(&self) -> Option<Address> {
        self.client.account()
    }

    pub fn form(&self) -> SwapForm {
        self.form.lock().clone()
    }

    pub fn update_form(&self, edit: impl FnOnce(&mut SwapForm)) {
        edit(&mut self.form.lock());
    }

    /// True while a swap or quote is running; the swap button is disabled meanwhile
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// "Connect wallet" button
    pub async fn connect(&self) -> Result<Address, SwapError> {
        match self.client.connect().await {
            Ok(account) => {
                self.status().show(format!("Connected: {account}"));
                Ok(account)
            },
            Err(err) => {
                error!("connect failed: {err}");
                let message = match &err {
                    SwapError::MissingWallet | SwapError::NoAccounts => err.status_message(),
                    other => format!("Connection failed: {other}"),
                };
                self.status().show(message);
                Err(err)
            },
        }
    }

    pub fn disconnect(&self) {
        self.client.disconnect();
        self.status().show("Disconnected");
    }

    /// Quote with the current form, nothing is signed
    pub async fn request_quote(&self) -> Result<Quote, SwapError> {
        let Some(_guard) = FlightGuard::acquire(&self.in_flight) else {
            return Err(self.report(SwapError::FlowInProgress));
        };
        let result = async {
            self.client.wallet()?;
            let request = self.form().to_request()?;
            self.client.quote(&request).await
        }
        .await;
        result.map_err(|err| self.report(err))
    }

    /// "Execute swap" button
    pub async fn execute_swap(&self) -> Result<SwapOutcome, SwapError> {
        let Some(_guard) = FlightGuard::acquire(&self.in_flight) else {
            warn!("swap requested while another one is running");
            return Err(self.report(SwapError::FlowInProgress));
        };

        self.status().set("Preparing swap...");
        let result = async {
            self.client.wallet()?;
            let request = self.form().to_request()?;
            self.client.swap(&request).await
        }
        .await;
        result.map_err(|err| self.report(err))
    }

    fn report(&self, err: SwapError) -> SwapError {
        error!("swap flow failed: {err}");
        self.status().show(err.status_message());
        err
    }
}
