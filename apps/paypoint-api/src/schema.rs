//! # GraphQL Schema
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  mutation payment(request: PaymentInput!): PaymentResponse!            │
//! │       │                                                                 │
//! │       │ PaymentInput::into_request()                                    │
//! │       │   price ≥ 0, priceModifier → Decimal, additionalItem → strings  │
//! │       ▼                                                                 │
//! │  PaymentService::submit ──► price_payment ──► PaymentRecorder           │
//! │                                                                         │
//! │  query sales(request: SalesInput!): [Sale!]!                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SaleService::hourly_sales ──► SalesReader                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Date-times are read and written as RFC 3339. Inputs carrying an offset
//! are normalised to UTC before they reach the services.

use async_graphql::{
    Context, EmptySubscription, Enum, ErrorExtensions, InputObject, Json, Object, Schema,
    SimpleObject,
};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use paypoint_core::money::decimal_from_f64;
use paypoint_core::validation::validate_price;
use paypoint_core::{AdditionalItems, PaymentRequest, SaleBucket, TimeRange, ValidationError};
use rust_decimal::Decimal;

use crate::error::ApiError;
use crate::services::{PaymentService, SaleService};

/// The executable schema served on `/graphql`.
pub type PaypointSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema with the services as context data.
pub fn build_schema(payments: PaymentService, sales: SaleService) -> PaypointSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(payments)
        .data(sales)
        .finish()
}

// =============================================================================
// Types
// =============================================================================

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(name = "PaymentMethod", remote = "paypoint_core::PaymentMethod")]
pub enum PaymentMethodGql {
    Cash,
    CashOnDelivery,
    Visa,
    Mastercard,
    Amex,
    Jcb,
    LinePay,
    Paypay,
    Points,
    GrabPay,
    BankTransfer,
    Cheque,
}

#[derive(InputObject, Debug)]
pub struct PaymentInput {
    pub customer_id: String,
    pub price: Decimal,
    pub price_modifier: f64,
    pub payment_method: PaymentMethodGql,
    pub datetime: DateTime<Utc>,
    /// String keys to string values, e.g. `{"courier": "YAMATO"}`
    pub additional_item: Json<IndexMap<String, serde_json::Value>>,
}

impl PaymentInput {
    /// Converts the wire input into a core request.
    ///
    /// Rejects a negative price, a modifier with no decimal form and any
    /// non-string additional item value.
    pub fn into_request(self) -> Result<PaymentRequest, ValidationError> {
        validate_price(self.price)?;
        let price_modifier = decimal_from_f64("priceModifier", self.price_modifier)?;

        let mut additional_item = AdditionalItems::with_capacity(self.additional_item.0.len());
        for (key, value) in self.additional_item.0 {
            match value {
                serde_json::Value::String(s) => {
                    additional_item.insert(key, s);
                }
                other => {
                    return Err(ValidationError::invalid_format(
                        "additionalItem",
                        format!("value of {key} must be a string, got {other}"),
                    ));
                }
            }
        }

        Ok(PaymentRequest {
            customer_id: self.customer_id,
            price: self.price,
            price_modifier,
            payment_method: self.payment_method.into(),
            datetime: self.datetime.fixed_offset(),
            additional_item,
        })
    }
}

#[derive(InputObject, Debug)]
pub struct SalesInput {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(SimpleObject, Debug)]
pub struct PaymentResponse {
    pub final_price: Decimal,
    pub points: Decimal,
}

impl From<paypoint_core::PaymentResponse> for PaymentResponse {
    fn from(r: paypoint_core::PaymentResponse) -> Self {
        PaymentResponse {
            final_price: r.final_price,
            points: r.points,
        }
    }
}

/// Totals for one UTC hour.
#[derive(SimpleObject, Debug)]
pub struct Sale {
    /// Start of the hour
    pub datetime: DateTime<Utc>,
    pub sales: Decimal,
    pub points: Decimal,
}

impl From<SaleBucket> for Sale {
    fn from(b: SaleBucket) -> Self {
        Sale {
            datetime: b.hour_timestamp,
            sales: b.total_sales,
            points: b.total_points,
        }
    }
}

// =============================================================================
// Roots
// =============================================================================

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Hourly sales between `startTime` and `endTime`, both inclusive.
    async fn sales(&self, ctx: &Context<'_>, request: SalesInput) -> async_graphql::Result<Vec<Sale>> {
        let service = ctx.data::<SaleService>()?;
        let range = TimeRange::new(request.start_time, request.end_time);

        let buckets = service
            .hourly_sales(range)
            .await
            .map_err(|e| e.extend())?;

        Ok(buckets.into_iter().map(Sale::from).collect())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Validates, prices and records a payment.
    async fn payment(
        &self,
        ctx: &Context<'_>,
        request: PaymentInput,
    ) -> async_graphql::Result<PaymentResponse> {
        let service = ctx.data::<PaymentService>()?;

        let request = request
            .into_request()
            .map_err(|e| ApiError::from(e).extend())?;

        let response = service.submit(request).await.map_err(|e| e.extend())?;
        Ok(response.into())
    }
}
