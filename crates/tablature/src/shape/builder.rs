//! Fluent registration of target type shapes

use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use super::{ConstructFn, Member, Shape, TargetType, TypeInfo};

/// Resolved member values handed to a shape's construct function, in
/// declaration order.
pub struct Args {
    values: std::vec::IntoIter<Box<dyn Any>>,
}

impl Args {
    pub(crate) fn new(values: Vec<Box<dyn Any>>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }

    /// Take the next member value.
    ///
    /// # Panics
    ///
    /// Panics if the construct function takes more values than the shape
    /// declares members, or takes one at the wrong type. Both are
    /// registration bugs, not data errors.
    pub fn take<U: 'static>(&mut self) -> U {
        let value = self
            .values
            .next()
            .expect("construct function took more values than declared members");
        match value.downcast::<U>() {
            Ok(v) => *v,
            Err(_) => panic!("construct function took a member value at the wrong type"),
        }
    }
}

/// Builder for one shape: an ordered member list plus a construct function.
///
/// Member declaration order is the order values are handed to the
/// construct function.
pub struct ShapeBuilder<T: 'static> {
    members: Vec<Member>,
    construct: Option<ConstructFn>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Default for ShapeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> ShapeBuilder<T> {
    /// Create an empty shape builder.
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            construct: None,
            _marker: PhantomData,
        }
    }

    /// Declare a required member of type `U`, with the accessor used when
    /// serializing an instance back to a tree.
    pub fn required<U: 'static>(
        mut self,
        name: &str,
        get: impl Fn(&T) -> U + Send + Sync + 'static,
    ) -> Self {
        self.members.push(Member {
            name: name.to_string(),
            ty: TargetType::of::<U>(),
            default: None,
            accessor: Some(accessor(get)),
            mutator: None,
            skip: false,
        });
        self
    }

    /// Declare an optional member with a default used when the source
    /// table has no matching key.
    pub fn optional<U: Clone + Send + Sync + 'static>(
        mut self,
        name: &str,
        default: U,
        get: impl Fn(&T) -> U + Send + Sync + 'static,
    ) -> Self {
        self.members.push(Member {
            name: name.to_string(),
            ty: TargetType::of::<U>(),
            default: Some(Arc::new(move || Box::new(default.clone()) as Box<dyn Any>)),
            accessor: Some(accessor(get)),
            mutator: None,
            skip: false,
        });
        self
    }

    /// Supply the construct function, invoked with the resolved member
    /// values in declaration order.
    pub fn construct(mut self, f: impl Fn(&mut Args) -> T + Send + Sync + 'static) -> Self {
        self.construct = Some(Arc::new(move |mut args: Args| {
            Box::new(f(&mut args)) as Box<dyn Any>
        }));
        self
    }

    pub(crate) fn finish(self) -> Shape {
        Shape {
            members: self.members,
            construct: self
                .construct
                .expect("shape registered without a construct function"),
        }
    }
}

/// Builder for registering a target type: its shapes, settable members,
/// and default-construction fallback.
pub struct TypeBuilder<T: 'static> {
    info: TypeInfo,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Default for TypeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> TypeBuilder<T> {
    /// Start describing type `T`.
    pub fn new() -> Self {
        Self {
            info: TypeInfo {
                name: std::any::type_name::<T>(),
                shapes: Vec::new(),
                settable: Vec::new(),
                fallback: None,
            },
            _marker: PhantomData,
        }
    }

    /// Declare one construction plan. Declaration order breaks ties
    /// between equally sized candidates.
    pub fn shape(mut self, shape: ShapeBuilder<T>) -> Self {
        self.info.shapes.push(shape.finish());
        self
    }

    /// Declare a public settable member, used by the post-construction
    /// fill path and by plain-record emission.
    pub fn settable<U: 'static>(
        self,
        name: &str,
        get: impl Fn(&T) -> U + Send + Sync + 'static,
        set: impl Fn(&mut T, U) + Send + Sync + 'static,
    ) -> Self {
        self.push_settable(name, get, set, false)
    }

    /// As [`TypeBuilder::settable`], but invisible to binding and
    /// emission in both directions.
    pub fn settable_skip<U: 'static>(
        self,
        name: &str,
        get: impl Fn(&T) -> U + Send + Sync + 'static,
        set: impl Fn(&mut T, U) + Send + Sync + 'static,
    ) -> Self {
        self.push_settable(name, get, set, true)
    }

    /// Allow default construction plus a mandatory member fill as a last
    /// resort when every shape candidate fails (the behavior of
    /// copy-semantics value types, which are always default-constructible).
    pub fn fallback_default(mut self) -> Self
    where
        T: Default,
    {
        self.info.fallback = Some(Arc::new(|| Box::new(T::default()) as Box<dyn Any>));
        self
    }

    pub(crate) fn finish(self) -> TypeInfo {
        self.info
    }

    fn push_settable<U: 'static>(
        mut self,
        name: &str,
        get: impl Fn(&T) -> U + Send + Sync + 'static,
        set: impl Fn(&mut T, U) + Send + Sync + 'static,
        skip: bool,
    ) -> Self {
        self.info.settable.push(Member {
            name: name.to_string(),
            ty: TargetType::of::<U>(),
            default: None,
            accessor: Some(accessor(get)),
            mutator: Some(Arc::new(move |instance: &mut dyn Any, value: Box<dyn Any>| {
                match (instance.downcast_mut::<T>(), value.downcast::<U>()) {
                    (Some(target), Ok(v)) => {
                        set(target, *v);
                        true
                    }
                    _ => false,
                }
            })),
            skip,
        });
        self
    }
}

fn accessor<T: 'static, U: 'static>(
    get: impl Fn(&T) -> U + Send + Sync + 'static,
) -> super::AccessorFn {
    Arc::new(move |instance: &dyn Any| {
        instance
            .downcast_ref::<T>()
            .map(|t| Box::new(get(t)) as Box<dyn Any>)
    })
}
