use axum::{extract::Path, Json};
use serde_json::{json, Value};
use tracing::info;

use crate::{
    adapters::{
        dto::param_dto::{
            AliasedItemQuery, BoundedLengthItemQuery, CodedItemPath, CodedItemQuery,
            Credentials, DefaultItemQuery, IdNamePath, IdPath, InfoQuery, ItemIdResponse,
            ItemQuery, LimitInfoQuery, MessageResponse, ModelName, ModelPath, NumericIdPath,
            OptionalLimitQuery, PageQuery, ProductCodePath, RangedItemPath, RangedItemQuery,
        },
        extractors::{ValidatedForm, ValidatedPath, ValidatedQuery},
    },
    application::error::ApplicationError,
};

pub struct ParamController;

impl ParamController {
    /// GET /args1/1
    pub async fn fixed_path() -> Json<MessageResponse> {
        Json(MessageResponse {
            message: "id1".to_string(),
        })
    }

    /// GET /args2/{id}
    pub async fn string_id(ValidatedPath(path): ValidatedPath<IdPath>) -> Json<MessageResponse> {
        Json(MessageResponse {
            message: format!("id2: {}", path.id),
        })
    }

    /// GET /args4/{id}
    pub async fn numeric_id(
        ValidatedPath(path): ValidatedPath<NumericIdPath>,
    ) -> Json<MessageResponse> {
        Json(MessageResponse {
            message: format!("id is {}", path.id),
        })
    }

    /// GET /args5/{id}/{name}
    pub async fn id_and_name(ValidatedPath(path): ValidatedPath<IdNamePath>) -> Json<IdNamePath> {
        Json(path)
    }

    /// GET /item3/{item_id}
    pub async fn ranged_item(
        ValidatedPath(path): ValidatedPath<RangedItemPath>,
    ) -> Json<ItemIdResponse<i64>> {
        Json(ItemIdResponse {
            item_id: path.item_id,
        })
    }

    /// GET /item4/{item_id}
    pub async fn coded_item(
        ValidatedPath(path): ValidatedPath<CodedItemPath>,
    ) -> Json<ItemIdResponse<String>> {
        Json(ItemIdResponse {
            item_id: path.item_id,
        })
    }

    /// GET /item5/{model}
    pub async fn model(ValidatedPath(path): ValidatedPath<ModelPath>) -> Json<Value> {
        let summary = match path.model {
            ModelName::Alexnet => "Deep Learning FTW!",
            ModelName::Lenet => "LeCNN all the images",
            ModelName::Resnet => "Have some residuals",
        };
        Json(json!({ "model": path.model, "message": summary }))
    }

    /// GET /item6/{item_id}
    pub async fn product_code(
        ValidatedPath(path): ValidatedPath<ProductCodePath>,
    ) -> Json<ItemIdResponse<String>> {
        Json(ItemIdResponse {
            item_id: path.item_id,
        })
    }

    /// GET /query1?page&limit
    pub async fn page_limit(ValidatedQuery(query): ValidatedQuery<PageQuery>) -> Json<PageQuery> {
        Json(query)
    }

    /// GET /query2?page[&limit]
    pub async fn page_optional_limit(
        ValidatedQuery(query): ValidatedQuery<OptionalLimitQuery>,
    ) -> Json<OptionalLimitQuery> {
        Json(query)
    }

    /// GET /query3?page&limit&info
    pub async fn page_limit_info(
        ValidatedQuery(query): ValidatedQuery<InfoQuery>,
    ) -> Json<InfoQuery> {
        Json(query)
    }

    /// GET /query4/{page}?limit&info
    pub async fn path_page_limit_info(
        Path(page): Path<String>,
        ValidatedQuery(query): ValidatedQuery<LimitInfoQuery>,
    ) -> Json<InfoQuery> {
        Json(InfoQuery {
            page,
            limit: query.limit,
            info: query.info,
        })
    }

    /// GET /items1?item_id (defaults to "123")
    pub async fn default_item(
        ValidatedQuery(query): ValidatedQuery<DefaultItemQuery>,
    ) -> Json<ItemIdResponse<String>> {
        Json(ItemIdResponse {
            item_id: query.item_id,
        })
    }

    /// GET /items2?item_id
    pub async fn required_item(
        ValidatedQuery(query): ValidatedQuery<ItemQuery>,
    ) -> Json<ItemIdResponse<String>> {
        Json(ItemIdResponse {
            item_id: query.item_id,
        })
    }

    /// GET /items3?item_id
    pub async fn bounded_length_item(
        ValidatedQuery(query): ValidatedQuery<BoundedLengthItemQuery>,
    ) -> Json<ItemIdResponse<String>> {
        Json(ItemIdResponse {
            item_id: query.item_id,
        })
    }

    /// GET /items4?item_id
    pub async fn ranged_query_item(
        ValidatedQuery(query): ValidatedQuery<RangedItemQuery>,
    ) -> Json<ItemIdResponse<i64>> {
        Json(ItemIdResponse {
            item_id: query.item_id,
        })
    }

    /// GET /items5?id
    pub async fn aliased_item(
        ValidatedQuery(query): ValidatedQuery<AliasedItemQuery>,
    ) -> Json<ItemIdResponse<String>> {
        Json(ItemIdResponse {
            item_id: query.item_id,
        })
    }

    /// GET /items8?item_id
    pub async fn coded_query_item(
        ValidatedQuery(query): ValidatedQuery<CodedItemQuery>,
    ) -> Json<ItemIdResponse<String>> {
        Json(ItemIdResponse {
            item_id: query.item_id,
        })
    }

    /// Credentials passed as query parameters.
    /// POST /login1?username&password
    pub async fn login_query(
        ValidatedQuery(credentials): ValidatedQuery<Credentials>,
    ) -> Json<Credentials> {
        info!("Login attempt (query) for {}", credentials.username);
        Json(credentials)
    }

    /// Credentials passed as an urlencoded form.
    /// POST /login2
    pub async fn login_form(
        ValidatedForm(credentials): ValidatedForm<Credentials>,
    ) -> Result<Json<Credentials>, ApplicationError> {
        if credentials.username.trim().is_empty() {
            return Err(ApplicationError::Validation(
                "username must not be empty".to_string(),
            ));
        }
        info!("Login attempt (form) for {}", credentials.username);
        Ok(Json(credentials))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::test_utils::create_test_app;

    #[tokio::test]
    async fn path_parameters_are_typed() {
        let (server, _dir) = create_test_app().await;

        let body: Value = server.get("/args2/abc").await.json();
        assert_eq!(body["message"], "id2: abc");

        let body: Value = server.get("/args4/42").await.json();
        assert_eq!(body["message"], "id is 42");

        server
            .get("/args4/forty-two")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = server.get("/args5/7/bob").await.json();
        assert_eq!(body, json!({ "id": "7", "name": "bob" }));
    }

    #[tokio::test]
    async fn path_constraints_are_enforced() {
        let (server, _dir) = create_test_app().await;

        server.get("/item3/50").await.assert_status_ok();
        server
            .get("/item3/18")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        server
            .get("/item3/100")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        server.get("/item4/a12").await.assert_status_ok();
        server
            .get("/item4/a123")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = server.get("/item5/resnet").await.json();
        assert_eq!(body["model"], "resnet");
        server
            .get("/item5/vgg")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        server.get("/item6/P-100").await.assert_status_ok();
        server
            .get("/item6/X-100")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn query_parameters() {
        let (server, _dir) = create_test_app().await;

        let body: Value = server.get("/query1?page=1&limit=10").await.json();
        assert_eq!(body, json!({ "page": "1", "limit": "10" }));
        server
            .get("/query1?page=1")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = server.get("/query2?page=1").await.json();
        assert_eq!(body["limit"], Value::Null);

        server
            .get("/query3?page=1&limit=10&info=abc")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = server.get("/query4/3?limit=10&info=100").await.json();
        assert_eq!(body, json!({ "page": "3", "limit": "10", "info": 100 }));
    }

    #[tokio::test]
    async fn query_constraints() {
        let (server, _dir) = create_test_app().await;

        let body: Value = server.get("/items1").await.json();
        assert_eq!(body["item_id"], "123");

        server
            .get("/items2")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        server.get("/items3?item_id=abcd").await.assert_status_ok();
        server
            .get("/items3?item_id=ab")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        server
            .get("/items4?item_id=0")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = server.get("/items5?id=xyz").await.json();
        assert_eq!(body["item_id"], "xyz");

        server
            .get("/items8?item_id=b12")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn login_via_query_and_form() {
        let (server, _dir) = create_test_app().await;

        let body: Value = server
            .post("/login1?username=ann&password=pw")
            .await
            .json();
        assert_eq!(body["username"], "ann");

        let body: Value = server
            .post("/login2")
            .form(&[("username", "ann"), ("password", "pw")])
            .await
            .json();
        assert_eq!(body, json!({ "username": "ann", "password": "pw" }));

        server
            .post("/login2")
            .form(&[("username", "ann")])
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}
