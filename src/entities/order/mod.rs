//! Order entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::OrderDescriptor;
pub use handlers::*;
pub use model::{
    Address, AppliedPromo, CreateOrder, Customer, DeliveryWindow, Order, OrderItem, OrderQuery,
    Payment, PaymentInput, PaymentMethod, PromoCodeRef, Shipping, ShippingMethod,
    UpdateOrderStatus,
};
