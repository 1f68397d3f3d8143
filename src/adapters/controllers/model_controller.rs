use axum::Json;
use tracing::info;

use crate::{
    adapters::extractors::ValidatedJson,
    domain::models::catalog::{
        Account, Contact, Document, Item, Order, Person, Product, Task,
    },
};

/// Echo endpoints: each body is deserialized and validated before the
/// handler runs, so a handler only ever sees valid input.
pub struct ModelController;

impl ModelController {
    /// POST /users
    pub async fn create_person(
        ValidatedJson(person): ValidatedJson<Person>,
    ) -> Json<Person> {
        Json(person)
    }

    /// POST /products
    pub async fn create_product(
        ValidatedJson(product): ValidatedJson<Product>,
    ) -> Json<Product> {
        Json(product)
    }

    /// POST /accounts
    pub async fn create_account(
        ValidatedJson(account): ValidatedJson<Account>,
    ) -> Json<Account> {
        info!("Account accepted for {}", account.username);
        Json(account)
    }

    /// POST /items
    pub async fn create_item(
        ValidatedJson(item): ValidatedJson<Item>,
    ) -> Json<Item> {
        Json(item)
    }

    /// POST /contacts
    pub async fn create_contact(
        ValidatedJson(contact): ValidatedJson<Contact>,
    ) -> Json<Contact> {
        Json(contact)
    }

    /// POST /orders
    pub async fn create_order(
        ValidatedJson(order): ValidatedJson<Order>,
    ) -> Json<Order> {
        info!("Order with {} items for {}", order.items.len(), order.address);
        Json(order)
    }

    /// POST /tasks
    pub async fn create_task() -> Json<Task> {
        Json(Task::default())
    }

    /// POST /documents
    pub async fn create_document() -> Json<Document> {
        Json(Document::default())
    }
}
