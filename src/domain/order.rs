//! Order wire model: customization levels, modification tags and the payloads
//! exchanged with `/api/postOrder` and `/api/getUserOrders`.

use serde::{Deserialize, Serialize};

use crate::domain::types::{EmployeeId, IngredientId, OrderId, ProductId};

/// Sweetness chosen for a drink.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SugarLevel {
    #[serde(rename = "200%")]
    Double,
    #[serde(rename = "150%")]
    OneAndHalf,
    #[default]
    #[serde(rename = "100%")]
    Regular,
    #[serde(rename = "80%")]
    Less,
    #[serde(rename = "50%")]
    Half,
    #[serde(rename = "30%")]
    Light,
    #[serde(rename = "0%")]
    None,
}

impl SugarLevel {
    pub const ALL: [SugarLevel; 7] = [
        SugarLevel::Double,
        SugarLevel::OneAndHalf,
        SugarLevel::Regular,
        SugarLevel::Less,
        SugarLevel::Half,
        SugarLevel::Light,
        SugarLevel::None,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SugarLevel::Double => "200%",
            SugarLevel::OneAndHalf => "150%",
            SugarLevel::Regular => "100%",
            SugarLevel::Less => "80%",
            SugarLevel::Half => "50%",
            SugarLevel::Light => "30%",
            SugarLevel::None => "0%",
        }
    }
}

/// Cup size chosen for a drink.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SizeLevel {
    Small,
    #[default]
    Normal,
    Large,
}

impl SizeLevel {
    pub const ALL: [SizeLevel; 3] = [SizeLevel::Small, SizeLevel::Normal, SizeLevel::Large];

    pub fn as_str(self) -> &'static str {
        match self {
            SizeLevel::Small => "small",
            SizeLevel::Normal => "normal",
            SizeLevel::Large => "large",
        }
    }
}

/// Ice / temperature chosen for a drink.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IceLevel {
    NoIce,
    Less,
    #[default]
    Regular,
    Hot,
}

impl IceLevel {
    pub const ALL: [IceLevel; 4] = [IceLevel::NoIce, IceLevel::Less, IceLevel::Regular, IceLevel::Hot];

    pub fn as_str(self) -> &'static str {
        match self {
            IceLevel::NoIce => "no_ice",
            IceLevel::Less => "less",
            IceLevel::Regular => "regular",
            IceLevel::Hot => "hot",
        }
    }
}

/// Tag attached to an ingredient change on a line item.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ModificationType {
    Add,
    Remove,
    Less,
    Extra,
    #[default]
    None,
}

impl ModificationType {
    /// The four explicit actions offered by the cart editor.
    pub const ACTIONS: [ModificationType; 4] = [
        ModificationType::Add,
        ModificationType::Remove,
        ModificationType::Less,
        ModificationType::Extra,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModificationType::Add => "ADD",
            ModificationType::Remove => "REMOVE",
            ModificationType::Less => "LESS",
            ModificationType::Extra => "EXTRA",
            ModificationType::None => "NONE",
        }
    }

    /// Whether an ingredient in this state is charged its add-on price.
    pub fn is_charged(self) -> bool {
        matches!(self, ModificationType::Add | ModificationType::Extra)
    }
}

/// Modification as submitted with an order item.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct OrderModification {
    pub ingredient_id: IngredientId,
    pub modification_type: ModificationType,
    pub price_change: f64,
}

/// One item of an order payload.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price_at_sale: f64,
    pub sugar_level: SugarLevel,
    pub size_level: SizeLevel,
    pub ice_level: IceLevel,
    pub modifications: Vec<OrderModification>,
}

/// Who is buying: a cashier on shift or a signed-in customer.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Purchaser {
    Employee {
        employee_id: EmployeeId,
    },
    Customer {
        clerk_user_id: String,
        user_email: String,
        user_name: String,
    },
}

/// Body of `POST /api/postOrder`, handed to the backend verbatim.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct OrderPayload {
    pub total_amount: f64,
    #[serde(flatten)]
    pub purchaser: Purchaser,
    pub items: Vec<OrderItem>,
}

/// Response of `POST /api/postOrder`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct OrderReceipt {
    #[serde(default)]
    pub message: String,
    pub order_id: OrderId,
    #[serde(default)]
    pub email_sent: bool,
}

/// Modification of a past order item.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PastModification {
    pub ingredient_id: IngredientId,
    #[serde(default)]
    pub ingredient_name: String,
    #[serde(default)]
    pub modification_type: ModificationType,
    #[serde(default)]
    pub price_change: Option<f64>,
}

/// Item of a past order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PastOrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    #[serde(default)]
    pub sugar_level: SugarLevel,
    #[serde(default)]
    pub size_level: SizeLevel,
    #[serde(default)]
    pub ice_level: IceLevel,
    #[serde(default)]
    pub modifications: Vec<PastModification>,
}

/// One entry of the order history of a customer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PastOrder {
    pub order_id: OrderId,
    pub order_date: String,
    pub total_amount: f64,
    #[serde(default)]
    pub items: Vec<PastOrderItem>,
}

/// Envelope returned by `/api/getUserOrders`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct UserOrders {
    #[serde(default)]
    pub orders: Vec<PastOrder>,
}
