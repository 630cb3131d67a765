//! Collection builder tests: array nodes into sequence-shaped targets

use pretty_assertions::assert_eq;
use tablature::*;

fn int_array(values: &[i64]) -> Node {
    Node::array(values.iter().copied().map(Node::Integer).collect())
}

#[test]
fn test_direct_sequence_target() {
    let shapes = ShapeRegistry::new();
    shapes.register_sequence::<i64>();
    let conversions = ConversionRegistry::new();
    let binder = Binder::new(&shapes, &conversions);

    let out: Vec<i64> = binder.bind(&int_array(&[5, 6, 7])).unwrap();
    assert_eq!(out, vec![5, 6, 7]);
}

#[derive(Debug, Clone, PartialEq)]
struct HomoArrays {
    l: Vec<i64>,
    b: Vec<bool>,
}

#[test]
fn test_homogeneous_arrays_as_members() {
    let shapes = ShapeRegistry::new();
    shapes.register_sequence::<i64>();
    shapes.register_sequence::<bool>();
    shapes.register(
        TypeBuilder::<HomoArrays>::new().shape(
            ShapeBuilder::new()
                .required::<Vec<i64>>("L", |h: &HomoArrays| h.l.clone())
                .required::<Vec<bool>>("B", |h: &HomoArrays| h.b.clone())
                .construct(|args| HomoArrays {
                    l: args.take(),
                    b: args.take(),
                }),
        ),
    );
    let conversions = ConversionRegistry::new();
    let binder = Binder::new(&shapes, &conversions);

    let table = Node::Table(
        Table::new()
            .with("L", int_array(&[5, 6, 7]))
            .with(
                "B",
                Node::array(vec![Node::Bool(true), Node::Bool(false), Node::Bool(true)]),
            ),
    );
    let out: HomoArrays = binder.bind(&table).unwrap();
    assert_eq!(
        out,
        HomoArrays {
            l: vec![5, 6, 7],
            b: vec![true, false, true],
        }
    );
}

#[test]
fn test_heterogeneous_array_of_scalars() {
    let shapes = ShapeRegistry::new();
    shapes.register_sequence::<Scalar>();
    let conversions = ConversionRegistry::new();
    let binder = Binder::new(&shapes, &conversions);

    let array = Node::array(vec![
        Node::Integer(5),
        Node::Bool(true),
        Node::Float(5.55),
        Node::string("x"),
    ]);
    let out: Vec<Scalar> = binder.bind(&array).unwrap();
    assert_eq!(
        out,
        vec![
            Scalar::Integer(5),
            Scalar::Bool(true),
            Scalar::Float(5.55),
            Scalar::Str("x".to_string()),
        ]
    );
}

#[derive(Debug, Clone, PartialEq)]
struct Wrapper {
    values: Vec<i64>,
}

#[test]
fn test_array_binds_to_single_sequence_member_shape() {
    let shapes = ShapeRegistry::new();
    shapes.register_sequence::<i64>();
    shapes.register(
        TypeBuilder::<Wrapper>::new().shape(
            ShapeBuilder::new()
                .required::<Vec<i64>>("values", |w: &Wrapper| w.values.clone())
                .construct(|args| Wrapper {
                    values: args.take(),
                }),
        ),
    );
    let conversions = ConversionRegistry::new();
    let binder = Binder::new(&shapes, &conversions);

    // the array node itself stands in for the wrapper
    let out: Wrapper = binder.bind(&int_array(&[1, 2, 3])).unwrap();
    assert_eq!(
        out,
        Wrapper {
            values: vec![1, 2, 3],
        }
    );
}

#[derive(Debug, Clone, PartialEq)]
struct Total {
    sum: i64,
}

#[test]
fn test_sequence_converter_builds_unregistered_target() {
    let shapes = ShapeRegistry::new();
    let conversions = ConversionRegistry::new();
    conversions.register_seq(|items: Vec<i64>| Total {
        sum: items.iter().sum(),
    });
    let binder = Binder::new(&shapes, &conversions);

    let out: Total = binder.bind(&int_array(&[1, 2, 3])).unwrap();
    assert_eq!(out, Total { sum: 6 });
}

#[derive(Debug, Clone, PartialEq)]
struct Element {
    l: i64,
    b: bool,
}

#[test]
fn test_array_of_tables_preserves_order() {
    let shapes = ShapeRegistry::new();
    shapes.register_sequence::<Element>();
    shapes.register(
        TypeBuilder::<Element>::new().shape(
            ShapeBuilder::new()
                .required::<i64>("L", |e: &Element| e.l)
                .required::<bool>("B", |e: &Element| e.b)
                .construct(|args| Element {
                    l: args.take(),
                    b: args.take(),
                }),
        ),
    );
    let conversions = ConversionRegistry::new();
    let binder = Binder::new(&shapes, &conversions);

    let element = |l: i64, b: bool| Node::Table(Table::new().with("L", l).with("B", b));
    let array = Node::array(vec![element(1, true), element(2, false), element(3, true)]);

    let out: Vec<Element> = binder.bind(&array).unwrap();
    assert_eq!(
        out,
        vec![
            Element { l: 1, b: true },
            Element { l: 2, b: false },
            Element { l: 3, b: true },
        ]
    );
}

#[test]
fn test_exhausted_strategies_report_array_build() {
    let shapes = ShapeRegistry::new();
    let conversions = ConversionRegistry::new();
    let binder = Binder::new(&shapes, &conversions);

    let err = binder.bind::<u32>(&int_array(&[1, 2])).unwrap_err();
    assert!(matches!(err, BindError::ArrayBuild { .. }));
    assert!(err.to_string().contains("from an array node"));
}

#[test]
fn test_mismatched_element_falls_through_to_array_build() {
    let shapes = ShapeRegistry::new();
    shapes.register_sequence::<i64>();
    let conversions = ConversionRegistry::new();
    let binder = Binder::new(&shapes, &conversions);

    // the bool element cannot become i64, so the direct tier fails and
    // nothing else applies
    let array = Node::array(vec![Node::Integer(1), Node::Bool(true)]);
    let err = binder.bind::<Vec<i64>>(&array).unwrap_err();
    assert!(matches!(err, BindError::ArrayBuild { .. }));
}

#[test]
fn test_empty_array() {
    let shapes = ShapeRegistry::new();
    shapes.register_sequence::<i64>();
    let conversions = ConversionRegistry::new();
    let binder = Binder::new(&shapes, &conversions);

    let out: Vec<i64> = binder.bind(&int_array(&[])).unwrap();
    assert_eq!(out, Vec::<i64>::new());
}

#[test]
fn test_converted_elements_inside_arrays() {
    let shapes = ShapeRegistry::new();
    shapes.register_sequence::<i32>();
    let conversions = ConversionRegistry::new();
    conversions.register(|n: i64| n as i32);
    let binder = Binder::new(&shapes, &conversions);

    let out: Vec<i32> = binder.bind(&int_array(&[1, 2, 3])).unwrap();
    assert_eq!(out, vec![1i32, 2, 3]);
}
