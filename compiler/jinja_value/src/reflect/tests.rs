use super::*;
use crate::errors::EvalErrorKind;
use crate::reflected_type;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Debug)]
struct Image {
    id: i64,
    name: String,
    tags: Vec<String>,
}

reflected_type!(Image {
    "id" => id,
    "name" => name,
    "tags" => tags,
});

#[derive(Clone, Debug)]
struct Gallery {
    title: String,
    cover: Option<Arc<Image>>,
}

reflected_type!(Gallery {
    "title" => title,
    "cover" => cover,
});

static FRAME_CLONES: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
struct Frame {
    index: i64,
}

impl Clone for Frame {
    fn clone(&self) -> Self {
        FRAME_CLONES.fetch_add(1, Ordering::SeqCst);
        Frame { index: self.index }
    }
}

reflected_type!(Frame {
    "index" => index,
});

#[derive(Clone, Debug)]
struct Reel {
    frames: Vec<Frame>,
    poster: Option<Frame>,
}

reflected_type!(Reel {
    "frames" => frames,
    "poster" => poster,
});

fn image(id: i64, name: &str) -> Image {
    Image {
        id,
        name: name.to_string(),
        tags: vec!["raw".to_string()],
    }
}

fn ints(values: &[i64]) -> Value {
    Value::list(values.iter().copied().map(Value::int).collect())
}

#[test]
fn test_reflect_leaf_types() {
    assert_eq!(reflect(7_i64), Value::int(7));
    assert_eq!(reflect(7_u8), Value::int(7));
    assert_eq!(reflect(7_usize), Value::int(7));
    assert_eq!(reflect(true), Value::Bool(true));
    assert_eq!(reflect(1.5_f64), Value::Float(1.5));
    assert_eq!(reflect("abc".to_string()), Value::string("abc"));
    assert_eq!(reflect("abc"), Value::string("abc"));
    assert_eq!(reflect(None::<i64>), Value::Empty);
    assert_eq!(reflect(Some(3_i64)), Value::int(3));
}

#[test]
fn test_reflect_vec_matches_owned_list() {
    let reflected = reflect(vec![0_i64, 1, 2]);
    assert!(matches!(reflected, Value::GenericList(_)));

    let items = reflected.list_accessor();
    let native = ints(&[0, 1, 2]);
    let native_items = native.list_accessor();
    assert_eq!(items.size(), native_items.size());
    for i in 0..items.size() {
        assert_eq!(items.value_by_index(i), native_items.value_by_index(i));
    }
    assert_eq!(reflected, native);
}

#[test]
fn test_reflect_set_iterates_in_order() {
    let set: BTreeSet<i64> = [5, 1, 3].into_iter().collect();
    assert_eq!(reflect(set), ints(&[1, 3, 5]));
}

#[test]
fn test_reflect_deque() {
    let mut deque = VecDeque::new();
    deque.push_back(2_i64);
    deque.push_front(1_i64);
    assert_eq!(reflect(deque), ints(&[1, 2]));
}

#[test]
fn test_reflect_shared_container_does_not_copy() {
    let shared = Arc::new(vec![10_i64, 20]);
    let value = reflect(Arc::clone(&shared));
    assert_eq!(Arc::strong_count(&shared), 2);
    assert_eq!(value, ints(&[10, 20]));

    drop(value);
    assert_eq!(Arc::strong_count(&shared), 1);
}

#[test]
fn test_reflect_nested_containers() {
    let nested = vec![vec![1_i64], vec![2, 3]];
    let value = reflect(nested);
    let items = value.list_accessor();
    assert_eq!(items.size(), 2);
    assert_eq!(items.value_by_index(1), ints(&[2, 3]));
}

#[test]
fn test_reflected_aggregate_fields() {
    let value = reflect(image(1, "image1"));
    assert!(value.is_map());
    assert_eq!(value.subscript("id"), Ok(Value::int(1)));
    assert_eq!(value.subscript("name"), Ok(Value::string("image1")));
    assert_eq!(
        value.subscript("tags"),
        Ok(Value::list(vec![Value::string("raw")]))
    );
}

#[test]
fn test_reflected_aggregate_invalid_field() {
    let value = reflect(image(1, "image1"));
    let err = value.subscript("width").unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::InvalidField {
            field: "width".to_string()
        }
    );
}

#[test]
fn test_reflected_map_accessor_keys_and_ordinals() {
    let accessor = ReflectedMapAccessor::owned(image(4, "four"));
    assert_eq!(accessor.size(), 3);
    assert_eq!(accessor.keys(), vec!["id", "name", "tags"]);
    assert!(accessor.has_value("name"));
    assert!(!accessor.has_value("width"));
    assert_eq!(accessor.value_by_index(0), Ok(Value::int(4)));
    assert_eq!(accessor.value_by_index(1), Ok(Value::string("four")));
    assert!(matches!(
        accessor.value_by_index(3).map_err(|e| e.kind),
        Err(EvalErrorKind::IndexOutOfBounds { index: 3, len: 3 })
    ));
}

#[test]
fn test_reflect_shared_aggregate_does_not_copy() {
    let shared = Arc::new(image(2, "shared"));
    let value = reflect(Arc::clone(&shared));
    assert_eq!(Arc::strong_count(&shared), 2);
    assert_eq!(value.subscript("name"), Ok(Value::string("shared")));
}

#[test]
fn test_reflect_ref_copies() {
    let original = image(3, "copied");
    let value = original.reflect_ref();
    drop(original);
    assert_eq!(value.subscript("id"), Ok(Value::int(3)));
}

#[test]
fn test_field_table_is_shared() {
    let a = Image::field_accessors();
    let b = Image::field_accessors();
    assert!(std::ptr::eq(a, b));
}

#[test]
fn test_nested_aggregate_and_option() {
    let gallery = Gallery {
        title: "summer".to_string(),
        cover: Some(Arc::new(image(9, "beach"))),
    };
    let value = reflect(vec![gallery.clone(), Gallery { cover: None, ..gallery }]);
    let items = value.list_accessor();

    let first = items.value_by_index(0);
    let cover = first.subscript("cover").unwrap_or(Value::Empty);
    assert_eq!(cover.subscript("name"), Ok(Value::string("beach")));

    let second = items.value_by_index(1);
    assert_eq!(second.subscript("cover"), Ok(Value::Empty));
    assert_eq!(second.subscript("title"), Ok(Value::string("summer")));
}

#[test]
fn test_shared_aggregate_fields_are_borrowed() {
    let reel = Arc::new(Reel {
        frames: (0..3).map(|index| Frame { index }).collect(),
        poster: Some(Frame { index: 7 }),
    });
    let value = Reel::reflect_shared(Arc::clone(&reel));

    let frames = value.subscript("frames").unwrap();
    let items = frames.list_accessor();
    assert_eq!(items.size(), 3);
    for i in 0..items.size() {
        let frame = items.value_by_index(i);
        assert_eq!(frame.subscript("index"), Ok(Value::int(i64::try_from(i).unwrap())));
    }
    assert_eq!(items.value_by_index(3), Value::Empty);

    let poster = value.subscript("poster").unwrap();
    assert_eq!(poster.subscript("index"), Ok(Value::int(7)));

    assert_eq!(FRAME_CLONES.load(Ordering::SeqCst), 0);
}

#[test]
fn test_element_binding_outlives_parent_value() {
    let frames = vec![Frame { index: 4 }, Frame { index: 5 }];
    let list = reflect(Arc::new(frames));
    let second = list.list_accessor().value_by_index(1);
    drop(list);
    assert_eq!(second.subscript("index"), Ok(Value::int(5)));
}

#[test]
fn test_reflect_field_projects_member() {
    let anchor: Anchor<Image> = Arc::new(Arc::new(image(6, "six")));
    assert_eq!(
        reflect_field(&anchor, |img: &Image| Some(&img.name)),
        Value::string("six")
    );
    assert_eq!(
        reflect_field(&anchor, |img: &Image| img.tags.first()),
        Value::string("raw")
    );
    assert_eq!(
        reflect_field(&anchor, |img: &Image| img.tags.get(5)),
        Value::Empty
    );
}
