use super::*;

/// Best-effort description of a panic payload. Covers the payloads panic!() actually produces.
pub fn attempt_any_to_string(any: &dyn Any) -> String {
    if let Some(s) = any.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = any.downcast_ref::<String>() {
        s.clone()
    } else if let Some(inner) = any.downcast_ref::<Box<dyn Any + Send>>() {
        attempt_any_to_string(&**inner)
    } else {
        format!("non-string panic payload ({:?})", any.type_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn works_on_str() {
        assert_eq!(attempt_any_to_string(&"hull breach"), "hull breach");
    }

    #[test]
    fn works_on_string() {
        assert_eq!(attempt_any_to_string(&"hull breach".to_string()), "hull breach");
    }

    #[test]
    fn unwraps_boxed_payload() {
        let boxed: Box<dyn Any + Send> = Box::new("hull breach");
        assert_eq!(attempt_any_to_string(&boxed), "hull breach");
    }

    #[test]
    fn describes_other_payloads() {
        assert!(attempt_any_to_string(&7_u32).starts_with("non-string"));
    }
}
