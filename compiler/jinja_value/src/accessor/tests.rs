use super::*;
use crate::errors::{invalid_field, EvalErrorKind};
use pretty_assertions::assert_eq;

/// Counts from zero, never materialized.
struct Counter(usize);

impl ListItemAccessor for Counter {
    fn size(&self) -> usize {
        self.0
    }

    fn value_by_index(&self, index: usize) -> Value {
        if index < self.0 {
            Value::int(i64::try_from(index).unwrap_or(i64::MAX))
        } else {
            Value::Empty
        }
    }
}

/// Fixed two-field record.
struct Point;

impl MapItemAccessor for Point {
    fn has_value(&self, name: &str) -> bool {
        matches!(name, "x" | "y")
    }

    fn value_by_name(&self, name: &str) -> EvalResult {
        match name {
            "x" => Ok(Value::int(3)),
            "y" => Ok(Value::int(4)),
            _ => Err(invalid_field(name)),
        }
    }

    fn size(&self) -> usize {
        2
    }

    fn keys(&self) -> Vec<String> {
        vec!["x".to_string(), "y".to_string()]
    }

    fn value_by_index(&self, index: usize) -> EvalResult {
        match index {
            0 => self.value_by_name("x"),
            1 => self.value_by_name("y"),
            _ => Err(crate::errors::index_out_of_bounds(index, 2)),
        }
    }
}

#[test]
fn test_generic_list_iter() {
    let list = GenericList::new(Counter(3));
    let items: Vec<Value> = list.iter().collect();
    assert_eq!(items, vec![Value::int(0), Value::int(1), Value::int(2)]);
}

#[test]
fn test_generic_list_repeated_access() {
    let value = Value::generic_list(Counter(2));
    let items = value.list_accessor();
    assert_eq!(items.value_by_index(1), Value::int(1));
    assert_eq!(items.value_by_index(1), Value::int(1));
}

#[test]
fn test_generic_list_clone_shares_accessor() {
    let list = GenericList::new(Counter(4));
    let other = list.clone();
    assert!(Arc::ptr_eq(&list.shared(), &other.shared()));
}

#[test]
fn test_generic_map_subscript() {
    let point = Value::generic_map(Point);
    assert!(point.is_map());
    assert_eq!(point.subscript("x"), Ok(Value::int(3)));

    let err = point.subscript("z").unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::InvalidField {
            field: "z".to_string()
        }
    );
}

#[test]
fn test_generic_map_equals_owned_map() {
    let owned = Value::map_from([("x", Value::int(3)), ("y", Value::int(4))]);
    assert_eq!(Value::generic_map(Point), owned);
    assert_eq!(Value::generic_map(Point).to_string(), "{x: 3, y: 4}");
}

#[test]
fn test_values_list_adaptor() {
    let Value::List(items) = Value::list(vec![Value::string("a"), Value::string("b")]) else {
        panic!("expected owned list");
    };
    let adaptor = ValuesListAdaptor::new(items.clone());
    assert_eq!(adaptor.size(), 2);
    assert_eq!(adaptor.value_by_index(1), Value::string("b"));
    assert_eq!(adaptor.value_by_index(9), Value::Empty);
    assert!(Heap::ptr_eq(&adaptor.list, &items));
}

#[test]
fn test_empty_list_accessor() {
    assert_eq!(EmptyListAccessor.size(), 0);
    assert_eq!(EmptyListAccessor.value_by_index(0), Value::Empty);
}
