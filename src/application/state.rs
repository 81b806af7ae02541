//! Application state for the terminal order client.
//!
//! Owns the current view, the order form, and the handle of the order request
//! that is currently in flight.

use super::gateway::OrderGateway;
use super::order_form::OrderForm;
use crate::domain::{OrderReceipt, SubmissionError};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info, warn};

type SubmissionOutcome = Result<OrderReceipt, SubmissionError>;

/// Which screen is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    /// Landing page with the pizza picture
    Home,
    /// The order form
    Order,
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use bloom_pizza::application::{App, AppView, OrderGateway};
/// use bloom_pizza::domain::{FormValues, OrderReceipt, SubmissionError};
/// use std::sync::Arc;
///
/// struct Counter;
///
/// impl OrderGateway for Counter {
///     fn place_order(&self, _order: &FormValues) -> Result<OrderReceipt, SubmissionError> {
///         Ok(OrderReceipt { message: "thanks".to_string() })
///     }
/// }
///
/// let mut app = App::new(Arc::new(Counter));
/// assert_eq!(app.view, AppView::Home);
/// app.open_order_form();
/// assert_eq!(app.view, AppView::Order);
/// ```
pub struct App {
    pub view: AppView,
    pub order_form: OrderForm,
    /// Whether the key binding overlay is displayed
    pub show_help: bool,
    pub should_quit: bool,
    gateway: Arc<dyn OrderGateway>,
    inflight: Option<Receiver<SubmissionOutcome>>,
}

impl App {
    pub fn new(gateway: Arc<dyn OrderGateway>) -> Self {
        Self {
            view: AppView::Home,
            order_form: OrderForm::default(),
            show_help: false,
            should_quit: false,
            gateway,
            inflight: None,
        }
    }

    /// Shows the order form, always starting from empty values.
    pub fn open_order_form(&mut self) {
        self.discard_inflight();
        self.order_form = OrderForm::default();
        self.view = AppView::Order;
        debug!("opened order form");
    }

    pub fn go_home(&mut self) {
        self.discard_inflight();
        self.view = AppView::Home;
        debug!("returned to home view");
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn is_submitting(&self) -> bool {
        self.inflight.is_some()
    }

    /// Starts sending the current order on a worker thread.
    ///
    /// Does nothing unless the submit control is enabled.
    pub fn submit_order(&mut self) {
        let Some(order) = self.order_form.begin_submit() else {
            return;
        };

        let (sender, receiver) = mpsc::channel();
        let gateway = Arc::clone(&self.gateway);
        let spawned = thread::Builder::new()
            .name("order-submit".to_string())
            .spawn(move || {
                let outcome = gateway.place_order(&order);
                if sender.send(outcome).is_err() {
                    debug!("order response arrived after the form was closed");
                }
            });

        match spawned {
            Ok(_) => self.inflight = Some(receiver),
            Err(err) => {
                error!(error = %err, "could not start order submission");
                self.order_form
                    .complete_submit(Err(SubmissionError::Dispatch(err.to_string())));
            }
        }
    }

    /// Applies the order response if it has arrived.
    ///
    /// Returns `true` when the form changed.
    pub fn poll_submission(&mut self) -> bool {
        let Some(receiver) = &self.inflight else {
            return false;
        };

        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(SubmissionError::Dispatch(
                "worker stopped without a response".to_string(),
            )),
        };
        self.inflight = None;
        self.order_form.complete_submit(outcome);
        true
    }

    /// Blocks until the in-flight order, if any, has completed.
    pub fn wait_for_submission(&mut self) {
        let Some(receiver) = self.inflight.take() else {
            return;
        };

        let outcome = receiver.recv().unwrap_or_else(|_| {
            Err(SubmissionError::Dispatch(
                "worker stopped without a response".to_string(),
            ))
        });
        self.order_form.complete_submit(outcome);
    }

    fn discard_inflight(&mut self) {
        if self.inflight.take().is_some() {
            warn!("leaving the order form while an order is in flight; its response will be dropped");
        } else {
            info!(view = ?self.view, "navigating");
        }
    }
}
