pub mod metrics;
pub mod mock;
pub mod order;
pub mod provider;
pub mod razorpay;

pub use self::metrics::{init_metrics, render_metrics};
pub use order::{CreatedOrder, OrderError, OrderService};
pub use provider::{CreateOrderRequest, PaymentProvider, ProviderError};
pub use razorpay::RazorpayClient;
