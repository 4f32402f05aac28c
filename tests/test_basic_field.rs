use todos::basic::error::TodosError;
use todos::basic::field::TodosField;
use todos::basic::result::TodosResult;

#[tokio::test]
async fn test_basic_field() -> TodosResult<()> {
    let expected = TodosField.parse_datetime("2024-05-01 10:30:00")?;
    assert_eq!(TodosField.parse_datetime("2024-05-01T10:30")?, expected);
    assert_eq!(TodosField.parse_datetime("2024-05-01T10:30:00")?, expected);
    assert_eq!(TodosField.parse_datetime("2024-05-01 10:30")?, expected);
    assert_eq!(TodosField.parse_datetime(" 2024-05-01T10:30 ")?, expected);
    assert_eq!(TodosField.parse_datetime("2024-05-01T10:30:00+02:00")?, expected);
    assert_eq!(TodosField.format_datetime(&TodosField.parse_datetime("2024-05-01")?), "2024-05-01 00:00:00");
    assert_eq!(TodosField.format_datetime(&expected), "2024-05-01 10:30:00");
    assert!(TodosField.parse_datetime("not-a-date").is_err());
    assert!(TodosField.parse_datetime("2024-13-01T10:30").is_err());
    assert!(TodosField.parse_datetime("").is_err());

    assert_eq!(TodosField.check_name("buy milk")?, "buy milk");
    assert!(TodosField.check_name("").is_err());
    assert!(TodosField.check_name("   ").is_err());
    assert!(TodosField.check_name(&"a".repeat(255)).is_ok());
    assert!(TodosField.check_name(&"a".repeat(256)).is_err());
    assert!(TodosField.check_name(&"ä".repeat(255)).is_ok());

    assert_eq!(TodosField.check_description(None)?, None);
    assert_eq!(TodosField.check_description(Some(""))?, None);
    assert_eq!(TodosField.check_description(Some("2 liters"))?, Some("2 liters".to_string()));
    assert!(TodosField.check_description(Some(&"a".repeat(256))).is_err());

    assert_eq!(TodosField.check_prio(None)?, None);
    assert_eq!(TodosField.check_prio(Some(1))?, Some(1));
    assert_eq!(TodosField.check_prio(Some(3))?, Some(3));
    assert_eq!(TodosField.check_prio(Some(4))?, None);
    assert!(matches!(TodosField.check_prio(Some(0)), Err(TodosError::ValidationError(_))));
    assert!(matches!(TodosField.check_prio(Some(99)), Err(TodosError::ValidationError(_))));

    assert_eq!(TodosField.check_deadline(None)?, None);
    assert_eq!(TodosField.check_deadline(Some(""))?, None);
    assert_eq!(TodosField.check_deadline(Some("2024-05-01T10:30"))?, Some(expected));
    assert!(matches!(TodosField.check_deadline(Some("tomorrow")), Err(TodosError::ValidationError(_))));

    Ok(())
}

#[tokio::test]
async fn test_basic_error() -> TodosResult<()> {
    let error = TodosError::ParentNotFound("Parent todo 7 not found".to_string());
    assert_eq!(error.to_string(), "PARENT_NOT_FOUND##Parent todo 7 not found");
    assert_eq!(error.code(), "PARENT_NOT_FOUND");
    assert_eq!(error.message(), "Parent todo 7 not found");

    let error = TodosError::form(&TodosError::NotFound("Todo 1 not found".to_string()).to_string());
    assert!(matches!(&error, TodosError::NotFound(msg) if msg == "Todo 1 not found"));

    assert_eq!(TodosError::parse("VALIDATION_ERROR##a##b"), ("VALIDATION_ERROR".to_string(), "a##b".to_string()));
    assert_eq!(TodosError::parse("boom"), ("INTERNAL".to_string(), "boom".to_string()));
    assert!(matches!(TodosError::new("UNKNOWN", "x"), TodosError::InternalError(_)));

    let error: TodosError = "abc".parse::<i32>().unwrap_err().into();
    assert_eq!(error.code(), "VALIDATION_ERROR");
    let error: TodosError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
    assert_eq!(error.code(), "INTERNAL");

    Ok(())
}
