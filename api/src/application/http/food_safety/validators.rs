use babysafe_core::domain::{
    common::entities::app_errors::CoreError, food_safety::validation::validate_query,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct SearchFoodValidator {
    #[validate(custom(function = "validate_food_query"))]
    #[schema(example = "salmon", min_length = 2, max_length = 100)]
    pub query: String,
}

fn validate_food_query(query: &str) -> Result<(), ValidationError> {
    validate_query(query).map(|_| ()).map_err(|e| {
        let message = match e {
            CoreError::Validation(reason) => reason,
            other => other.to_string(),
        };
        ValidationError::new("query").with_message(message.into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_validation_uses_domain_rules() {
        let ok = SearchFoodValidator {
            query: " salmon ".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = SearchFoodValidator {
            query: "salmon; rm -rf".to_string(),
        };
        let errors = bad.validate().unwrap_err();
        let field_errors = errors.field_errors();
        let message = field_errors["query"][0].message.as_deref();
        assert_eq!(message, Some("Query contains invalid characters"));
    }
}
