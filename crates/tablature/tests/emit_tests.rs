//! Serialization tests: values back into trees, and full round trips

use pretty_assertions::assert_eq;
use tablature::*;

#[derive(Debug, Clone, PartialEq)]
struct Data {
    l: i64,
    d: f64,
    s: String,
    b: bool,
}

fn register_data(shapes: &ShapeRegistry) {
    shapes.register(
        TypeBuilder::<Data>::new().shape(
            ShapeBuilder::new()
                .required::<i64>("L", |d: &Data| d.l)
                .required::<f64>("D", |d: &Data| d.d)
                .required::<String>("S", |d: &Data| d.s.clone())
                .required::<bool>("B", |d: &Data| d.b)
                .construct(|args| Data {
                    l: args.take(),
                    d: args.take(),
                    s: args.take(),
                    b: args.take(),
                }),
        ),
    );
}

#[test]
fn test_emit_record_as_table() {
    let shapes = ShapeRegistry::new();
    register_data(&shapes);
    let emitter = Emitter::new(&shapes);

    let value = Data {
        l: 5,
        d: 0.123,
        s: "hello".to_string(),
        b: true,
    };
    let node = emitter.emit(&value).unwrap();

    let expected = Node::Table(
        Table::new()
            .with("L", 5i64)
            .with("D", 0.123)
            .with("S", "hello")
            .with("B", true),
    );
    assert_eq!(node, expected);
}

#[test]
fn test_round_trip_record() {
    let shapes = ShapeRegistry::new();
    register_data(&shapes);
    let conversions = ConversionRegistry::new();
    let emitter = Emitter::new(&shapes);
    let binder = Binder::new(&shapes, &conversions);

    let original = Data {
        l: -3,
        d: 2.5,
        s: "round".to_string(),
        b: false,
    };
    let node = emitter.emit(&original).unwrap();
    let bound: Data = binder.bind(&node).unwrap();
    assert_eq!(bound, original);
}

#[derive(Debug, Clone, PartialEq)]
struct Inner {
    l: i64,
}

#[derive(Debug, Clone, PartialEq)]
struct Nested {
    i: Inner,
}

#[test]
fn test_round_trip_nested_tables() {
    let shapes = ShapeRegistry::new();
    shapes.register(
        TypeBuilder::<Inner>::new().shape(
            ShapeBuilder::new()
                .required::<i64>("L", |i: &Inner| i.l)
                .construct(|args| Inner { l: args.take() }),
        ),
    );
    shapes.register(
        TypeBuilder::<Nested>::new().shape(
            ShapeBuilder::new()
                .required::<Inner>("I", |n: &Nested| n.i.clone())
                .construct(|args| Nested { i: args.take() }),
        ),
    );
    let conversions = ConversionRegistry::new();
    let emitter = Emitter::new(&shapes);
    let binder = Binder::new(&shapes, &conversions);

    let original = Nested { i: Inner { l: 5 } };
    let node = emitter.emit(&original).unwrap();
    assert_eq!(
        node,
        Node::Table(Table::new().with("I", Table::new().with("L", 5i64)))
    );

    let bound: Nested = binder.bind(&node).unwrap();
    assert_eq!(bound, original);
}

#[derive(Debug, Clone, PartialEq)]
struct Narrow {
    i: i32,
    f: f32,
    by: u8,
}

#[test]
fn test_round_trip_narrow_numerics() {
    let shapes = ShapeRegistry::new();
    shapes.register(
        TypeBuilder::<Narrow>::new().shape(
            ShapeBuilder::new()
                .required::<i32>("I", |n: &Narrow| n.i)
                .required::<f32>("F", |n: &Narrow| n.f)
                .required::<u8>("By", |n: &Narrow| n.by)
                .construct(|args| Narrow {
                    i: args.take(),
                    f: args.take(),
                    by: args.take(),
                }),
        ),
    );
    let conversions = ConversionRegistry::new();
    conversions.register(|n: i64| n as i32);
    conversions.register(|n: i64| n as u8);
    conversions.register(|n: f64| n as f32);
    let emitter = Emitter::new(&shapes);
    let binder = Binder::new(&shapes, &conversions);

    let original = Narrow {
        i: -9,
        f: 1.5,
        by: 255,
    };
    // narrow numerics widen to the tree's 64-bit leaves on the way out
    let node = emitter.emit(&original).unwrap();
    assert_eq!(
        node,
        Node::Table(
            Table::new()
                .with("I", -9i64)
                .with("F", 1.5)
                .with("By", 255i64)
        )
    );

    let bound: Narrow = binder.bind(&node).unwrap();
    assert_eq!(bound, original);
}

#[derive(Debug, Clone, PartialEq)]
struct Wide {
    u: u64,
}

#[test]
fn test_u64_member_cannot_be_emitted() {
    let shapes = ShapeRegistry::new();
    shapes.register(
        TypeBuilder::<Wide>::new().shape(
            ShapeBuilder::new()
                .required::<u64>("u", |w: &Wide| w.u)
                .construct(|args| Wide { u: args.take() }),
        ),
    );
    let emitter = Emitter::new(&shapes);

    let err = emitter.emit(&Wide { u: u64::MAX }).unwrap_err();
    assert!(matches!(err, BindError::TypeConversion { .. }));
}

#[derive(Debug, Clone, PartialEq)]
enum Level {
    Low,
    High,
}

#[test]
fn test_enum_emits_variant_name() {
    let shapes = ShapeRegistry::new();
    shapes.register_enum(vec![("Low", Level::Low), ("High", Level::High)]);
    let conversions = ConversionRegistry::new();
    let emitter = Emitter::new(&shapes);
    let binder = Binder::new(&shapes, &conversions);

    let node = emitter.emit(&Level::High).unwrap();
    assert_eq!(node, Node::string("High"));

    let bound: Level = binder.bind(&node).unwrap();
    assert_eq!(bound, Level::High);
}

#[derive(Debug, Clone, PartialEq)]
struct Element {
    l: i64,
}

#[test]
fn test_sequence_of_records_emits_table_array() {
    let shapes = ShapeRegistry::new();
    shapes.register_sequence::<Element>();
    shapes.register(
        TypeBuilder::<Element>::new().shape(
            ShapeBuilder::new()
                .required::<i64>("L", |e: &Element| e.l)
                .construct(|args| Element { l: args.take() }),
        ),
    );
    let conversions = ConversionRegistry::new();
    let emitter = Emitter::new(&shapes);
    let binder = Binder::new(&shapes, &conversions);

    let original = vec![Element { l: 1 }, Element { l: 2 }];
    let node = emitter.emit(&original).unwrap();

    // every emitted element is a table, so the array carries the
    // array-of-tables hint for the renderer
    let expected = Node::Array(ArrayNode::of_tables(vec![
        Node::Table(Table::new().with("L", 1i64)),
        Node::Table(Table::new().with("L", 2i64)),
    ]));
    assert_eq!(node, expected);

    let bound: Vec<Element> = binder.bind(&node).unwrap();
    assert_eq!(bound, original);
}

#[test]
fn test_sequence_of_leaves_has_no_table_hint() {
    let shapes = ShapeRegistry::new();
    shapes.register_sequence::<i64>();
    let emitter = Emitter::new(&shapes);

    let node = emitter.emit(&vec![1i64, 2, 3]).unwrap();
    assert_eq!(
        node,
        Node::array(vec![Node::Integer(1), Node::Integer(2), Node::Integer(3)])
    );
}

#[test]
fn test_heterogeneous_scalars_round_trip() {
    let shapes = ShapeRegistry::new();
    shapes.register_sequence::<Scalar>();
    let conversions = ConversionRegistry::new();
    let emitter = Emitter::new(&shapes);
    let binder = Binder::new(&shapes, &conversions);

    let original = vec![Scalar::Integer(5), Scalar::Bool(true), Scalar::Float(5.55)];
    let node = emitter.emit(&original).unwrap();
    assert_eq!(
        node,
        Node::array(vec![Node::Integer(5), Node::Bool(true), Node::Float(5.55)])
    );

    let bound: Vec<Scalar> = binder.bind(&node).unwrap();
    assert_eq!(bound, original);
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Settings {
    host: String,
    port: i64,
}

#[test]
fn test_plain_record_emits_through_settable_members() {
    let shapes = ShapeRegistry::new();
    shapes.register(
        TypeBuilder::<Settings>::new()
            .shape(ShapeBuilder::new().construct(|_| Settings::default()))
            .settable::<String>("host", |s| s.host.clone(), |s, v| s.host = v)
            .settable::<i64>("port", |s| s.port, |s, v| s.port = v),
    );
    let conversions = ConversionRegistry::new();
    let emitter = Emitter::new(&shapes);
    let binder = Binder::new(&shapes, &conversions);

    let original = Settings {
        host: "example.org".to_string(),
        port: 8080,
    };
    let node = emitter.emit(&original).unwrap();
    assert_eq!(
        node,
        Node::Table(
            Table::new()
                .with("host", "example.org")
                .with("port", 8080i64)
        )
    );

    let bound: Settings = binder.bind(&node).unwrap();
    assert_eq!(bound, original);
}

#[derive(Debug, Clone, PartialEq, Default)]
struct WithSecret {
    visible: i64,
    secret: i64,
}

#[test]
fn test_skip_members_are_omitted_in_both_directions() {
    let shapes = ShapeRegistry::new();
    shapes.register(
        TypeBuilder::<WithSecret>::new()
            .shape(ShapeBuilder::new().construct(|_| WithSecret::default()))
            .settable::<i64>("visible", |w| w.visible, |w, v| w.visible = v)
            .settable_skip::<i64>("secret", |w| w.secret, |w, v| w.secret = v),
    );
    let conversions = ConversionRegistry::new();
    let emitter = Emitter::new(&shapes);
    let binder = Binder::new(&shapes, &conversions);

    let node = emitter
        .emit(&WithSecret {
            visible: 1,
            secret: 99,
        })
        .unwrap();
    assert_eq!(node, Node::Table(Table::new().with("visible", 1i64)));

    // binding does not demand a key for the skipped member either
    let bound: WithSecret = binder.bind(&node).unwrap();
    assert_eq!(
        bound,
        WithSecret {
            visible: 1,
            secret: 0,
        }
    );
}

#[derive(Debug, Clone, PartialEq)]
struct Stamps {
    local: chrono::NaiveDateTime,
    offset: chrono::DateTime<chrono::FixedOffset>,
}

#[test]
fn test_round_trip_datetimes() {
    use chrono::{FixedOffset, NaiveDate, TimeZone};

    let shapes = ShapeRegistry::new();
    shapes.register(
        TypeBuilder::<Stamps>::new().shape(
            ShapeBuilder::new()
                .required::<chrono::NaiveDateTime>("local", |s: &Stamps| s.local)
                .required::<chrono::DateTime<FixedOffset>>("offset", |s: &Stamps| s.offset)
                .construct(|args| Stamps {
                    local: args.take(),
                    offset: args.take(),
                }),
        ),
    );
    let conversions = ConversionRegistry::new();
    let emitter = Emitter::new(&shapes);
    let binder = Binder::new(&shapes, &conversions);

    let original = Stamps {
        local: NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap(),
        offset: FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, 12, 30, 0)
            .unwrap(),
    };
    let node = emitter.emit(&original).unwrap();
    let bound: Stamps = binder.bind(&node).unwrap();
    assert_eq!(bound, original);
}
