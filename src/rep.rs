//! Conversions between Rust data and [`Tnet`].

use crate::{vecmap::*, Tnet::*, *};
use bytes::Bytes;
use std::{
    collections::{BTreeMap, HashMap},
    convert::{TryFrom, TryInto},
    fmt::Debug,
    hash::{BuildHasher, Hash},
    vec::IntoIter,
};

/// A value representable as [`Tnet`].
pub trait TnetRep: Clone + Sized {
    /// Converts value into [`Tnet`].
    ///
    /// # Example
    ///
    /// ```
    /// use tnetstring::rep::*;
    ///
    /// let t_num = 1u8.to_tnet();
    /// ```
    fn to_tnet(&self) -> Tnet { self.clone().into_tnet() }

    /// Consumes value, converting it into [`Tnet`].
    ///
    /// # Example
    ///
    /// ```
    /// use tnetstring::rep::*;
    ///
    /// let t_num = 1u8.into_tnet();
    /// ```
    fn into_tnet(self) -> Tnet { self.to_tnet() }

    /// Converts value from [`Tnet`], or `None` if `tn` has the wrong shape.
    ///
    /// # Example
    ///
    /// ```
    /// use tnetstring::rep::*;
    ///
    /// let t_str = "foo".to_string().into_tnet();
    ///
    /// assert_eq!(String::from_tnet(t_str).unwrap(), "foo");
    /// ```
    fn from_tnet(tn: Tnet) -> Option<Self>;
}

macro_rules! try_from_tnet_rep {
    ($($t:ty),*) => {
        $(
            impl TnetRep for $t {
                fn into_tnet(self) -> Tnet { self.into() }

                fn from_tnet(tn: Tnet) -> Option<Self> { tn.try_into().ok() }
            }
        )*
    };
}

try_from_tnet_rep!(Tnet, bool, Inum, Bytes, Float);

macro_rules! int_rep {
    ($($t:ty),*) => {
        $(
            impl TnetRep for $t {
                fn into_tnet(self) -> Tnet { Tnet::from(self) }

                fn from_tnet(tn: Tnet) -> Option<Self> {
                    <$t>::try_from(Inum::from_tnet(tn)?).ok()
                }
            }
        )*
    };
}

int_rep!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl TnetRep for f64 {
    fn into_tnet(self) -> Tnet { Tnet::from(self) }

    fn from_tnet(tn: Tnet) -> Option<Self> { Some(Float::from_tnet(tn)?.to_f64()) }
}

impl TnetRep for f32 {
    fn into_tnet(self) -> Tnet { Tnet::from(self) }

    fn from_tnet(tn: Tnet) -> Option<Self> { Some(f64::from_tnet(tn)? as f32) }
}

impl TnetRep for String {
    fn into_tnet(self) -> Tnet { Byt(Bytes::from(self)) }

    fn to_tnet(&self) -> Tnet { Tnet::from(self.as_str()) }

    fn from_tnet(tn: Tnet) -> Option<Self> {
        String::from_utf8(Bytes::from_tnet(tn)?.to_vec()).ok()
    }
}

impl<T: TnetRep> TnetRep for Vec<T> {
    fn into_tnet(self) -> Tnet { List(self.into_iter().map(T::into_tnet).collect()) }

    fn to_tnet(&self) -> Tnet { List(self.iter().map(T::to_tnet).collect()) }

    fn from_tnet(tn: Tnet) -> Option<Self> {
        tn.into_vec().ok()?.into_iter().map(T::from_tnet).collect()
    }
}

impl<K: TnetRep, V: TnetRep> TnetRep for VecMap<K, V> {
    fn into_tnet(self) -> Tnet {
        Dict(
            self.into_iter()
                .map(|(k, v)| (k.into_tnet(), v.into_tnet()))
                .collect(),
        )
    }

    fn to_tnet(&self) -> Tnet {
        Dict(self.iter().map(|(k, v)| (k.to_tnet(), v.to_tnet())).collect())
    }

    fn from_tnet(tn: Tnet) -> Option<Self> {
        tn.into_dict()
            .ok()?
            .into_iter()
            .map(|(k, v)| Some((K::from_tnet(k)?, V::from_tnet(v)?)))
            .collect()
    }
}

impl<K, V, S> TnetRep for HashMap<K, V, S>
where
    K: TnetRep + Eq + Hash,
    V: TnetRep,
    S: BuildHasher + Default + Clone,
{
    fn into_tnet(self) -> Tnet {
        Dict(
            self.into_iter()
                .map(|(k, v)| (k.into_tnet(), v.into_tnet()))
                .collect(),
        )
    }

    fn to_tnet(&self) -> Tnet {
        Dict(self.iter().map(|(k, v)| (k.to_tnet(), v.to_tnet())).collect())
    }

    fn from_tnet(tn: Tnet) -> Option<Self> {
        tn.into_dict()
            .ok()?
            .into_iter()
            .map(|(k, v)| Some((K::from_tnet(k)?, V::from_tnet(v)?)))
            .collect()
    }
}

impl<K: TnetRep + Ord, V: TnetRep> TnetRep for BTreeMap<K, V> {
    fn into_tnet(self) -> Tnet {
        Dict(
            self.into_iter()
                .map(|(k, v)| (k.into_tnet(), v.into_tnet()))
                .collect(),
        )
    }

    fn to_tnet(&self) -> Tnet {
        Dict(self.iter().map(|(k, v)| (k.to_tnet(), v.to_tnet())).collect())
    }

    fn from_tnet(tn: Tnet) -> Option<Self> {
        tn.into_dict()
            .ok()?
            .into_iter()
            .map(|(k, v)| Some((K::from_tnet(k)?, V::from_tnet(v)?)))
            .collect()
    }
}

impl TnetRep for () {
    fn into_tnet(self) -> Tnet { List(vec![]) }

    fn from_tnet(tn: Tnet) -> Option<()> {
        if tn.into_vec().ok()?.is_empty() {
            Some(())
        } else {
            None
        }
    }
}

impl<A: TnetRep, B: TnetRep> TnetRep for (A, B) {
    fn into_tnet(self) -> Tnet { List(vec![self.0.into_tnet(), self.1.into_tnet()]) }

    fn from_tnet(tn: Tnet) -> Option<Self> {
        let mut iter = tn.into_vec().ok()?.into_iter();
        let a = pop_tnet(&mut iter)?;
        let b = pop_tnet(&mut iter)?;
        if iter.next().is_none() {
            Some((a, b))
        } else {
            None
        }
    }
}

impl<A: TnetRep, B: TnetRep, C: TnetRep> TnetRep for (A, B, C) {
    fn into_tnet(self) -> Tnet {
        List(vec![
            self.0.into_tnet(),
            self.1.into_tnet(),
            self.2.into_tnet(),
        ])
    }

    fn from_tnet(tn: Tnet) -> Option<Self> {
        let mut iter = tn.into_vec().ok()?.into_iter();
        let a = pop_tnet(&mut iter)?;
        let b = pop_tnet(&mut iter)?;
        let c = pop_tnet(&mut iter)?;
        if iter.next().is_none() {
            Some((a, b, c))
        } else {
            None
        }
    }
}

/// `None` is null and `Some(x)` is `x` itself, so the wrapped type must never be null
/// for the mapping to be reversible.
///
/// # Example
///
/// ```
/// use tnetstring::prelude::*;
///
/// assert_eq!(Some(5u8).into_tnet(), Tnet::from(5));
/// assert_eq!(None::<u8>.into_tnet(), Tnet::Null);
/// assert_eq!(Option::<u8>::from_tnet(Tnet::Null), Some(None));
/// ```
impl<T: TnetNotNull> TnetRep for Option<T> {
    fn into_tnet(self) -> Tnet { self.map_or(Null, T::into_tnet) }

    fn to_tnet(&self) -> Tnet { self.as_ref().map_or(Null, T::to_tnet) }

    fn from_tnet(tn: Tnet) -> Option<Self> {
        match tn {
            Null => Some(None),
            other => Some(Some(T::from_tnet(other)?)),
        }
    }
}

/// Values whose [`Tnet`] representation is never [`Tnet::Null`].
pub trait TnetNotNull: TnetRep {}

impl TnetNotNull for bool {}
impl TnetNotNull for i8 {}
impl TnetNotNull for i16 {}
impl TnetNotNull for i32 {}
impl TnetNotNull for i64 {}
impl TnetNotNull for isize {}
impl TnetNotNull for u8 {}
impl TnetNotNull for u16 {}
impl TnetNotNull for u32 {}
impl TnetNotNull for u64 {}
impl TnetNotNull for usize {}
impl TnetNotNull for f32 {}
impl TnetNotNull for f64 {}
impl TnetNotNull for Inum {}
impl TnetNotNull for Float {}
impl TnetNotNull for Bytes {}
impl TnetNotNull for String {}
impl TnetNotNull for () {}
impl<T: TnetRep> TnetNotNull for Vec<T> {}
impl<K: TnetRep, V: TnetRep> TnetNotNull for VecMap<K, V> {}
impl<K, V, S> TnetNotNull for HashMap<K, V, S>
where
    K: TnetRep + Eq + Hash,
    V: TnetRep,
    S: BuildHasher + Default + Clone,
{
}
impl<K: TnetRep + Ord, V: TnetRep> TnetNotNull for BTreeMap<K, V> {}
impl<A: TnetRep, B: TnetRep> TnetNotNull for (A, B) {}
impl<A: TnetRep, B: TnetRep, C: TnetRep> TnetNotNull for (A, B, C) {}

/// Converts the fields of a struct to a dictionary keyed by field name.
///
/// # Arguments
///
/// * `entries: Vec<(&str, Tnet)>` - The name of each field and its value.
///
/// # Example
///
/// ```
/// use tnetstring::prelude::*;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Point {
///     x: i64,
///     label: String,
/// }
///
/// impl TnetRep for Point {
///     fn to_tnet(&self) -> Tnet {
///         struct_to_tnet_helper(vec![
///             ("x", self.x.to_tnet()),
///             ("label", self.label.to_tnet()),
///         ])
///     }
///
///     fn from_tnet(tn: Tnet) -> Option<Point> {
///         let mut fields = struct_from_tnet_helper(tn, &["x", "label"])?.into_iter();
///         Some(Point {
///             x: pop_tnet(&mut fields)?,
///             label: pop_tnet(&mut fields)?,
///         })
///     }
/// }
///
/// let p = Point {
///     x: 3,
///     label: "origin".to_string(),
/// };
///
/// let wire = dumps(&p.to_tnet()).unwrap();
/// assert_eq!(wire, b"25:1:x,1:3#5:label,6:origin,}".to_vec());
///
/// let back = Point::from_tnet(loads(wire).unwrap()).unwrap();
/// assert_eq!(back, p);
/// ```
pub fn struct_to_tnet_helper(entries: Vec<(&str, Tnet)>) -> Tnet {
    Dict(entries.into_iter().map(|(k, v)| (Tnet::from(k), v)).collect())
}

/// Reads the fields of a struct, in the order given by `names`, from a dictionary keyed by
/// field name. See [`struct_to_tnet_helper`] for an example.
///
/// Returns `None` unless every name is present and there are no other keys.
///
/// # Arguments
///
/// * `tn: Tnet` - The dictionary containing the struct data.
/// * `names: &[&str]` - The names of the fields in the order they are to be extracted.
pub fn struct_from_tnet_helper(tn: Tnet, names: &[&str]) -> Option<Vec<Tnet>> {
    let mut m = tn.into_dict().ok()?;
    m.dedup_keys();
    let outs: Vec<Tnet> = names
        .iter()
        .filter_map(|n| m.get(*n).cloned())
        .collect();
    if outs.len() == names.len() && outs.len() == m.len() {
        Some(outs)
    } else {
        None
    }
}

/// Converts an enum variant to a list whose first element is the variant name.
///
/// # Arguments
///
/// * `name: &str` - The name of the enum variant.
/// * `fields: Vec<Tnet>` - The corresponding values.
///
/// # Example
///
/// ```
/// use std::vec::IntoIter;
/// use tnetstring::prelude::*;
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Figure {
///     Circle(u32),
///     Rect(u32, u32),
/// }
///
/// use Figure::*;
///
/// impl TnetRep for Figure {
///     fn to_tnet(&self) -> Tnet {
///         match self {
///             Circle(r) => enum_to_tnet_helper("Circle", vec![r.to_tnet()]),
///             Rect(w, h) => enum_to_tnet_helper("Rect", vec![w.to_tnet(), h.to_tnet()]),
///         }
///     }
///
///     fn from_tnet(tn: Tnet) -> Option<Figure> {
///         let fns: Vec<(&str, Box<dyn FnMut(IntoIter<Tnet>) -> Option<Figure>>)> = vec![
///             (
///                 "Circle",
///                 Box::new(|mut iter: IntoIter<Tnet>| Some(Circle(pop_tnet(&mut iter)?))),
///             ),
///             (
///                 "Rect",
///                 Box::new(|mut iter: IntoIter<Tnet>| {
///                     Some(Rect(pop_tnet(&mut iter)?, pop_tnet(&mut iter)?))
///                 }),
///             ),
///         ];
///         enum_from_tnet_helper(tn, fns)
///     }
/// }
///
/// let r = Rect(2, 3);
/// assert_eq!(Figure::from_tnet(r.to_tnet()), Some(r));
/// ```
pub fn enum_to_tnet_helper(name: &str, mut fields: Vec<Tnet>) -> Tnet {
    fields.insert(0, Tnet::from(name));
    List(fields)
}

/// Reads an enum variant written by [`enum_to_tnet_helper`], dispatching on the variant
/// name.
pub fn enum_from_tnet_helper<T: Debug>(
    tn: Tnet,
    fns: Vec<(&str, Box<dyn FnMut(IntoIter<Tnet>) -> Option<T>>)>,
) -> Option<T> {
    let mut fields = tn.into_vec().ok()?.into_iter();

    let constructor = fields.next()?;
    for (name, mut f) in fns {
        if constructor == *name {
            return f(fields);
        }
    }
    None
}

/// Gets the next element from an iterator of [`Tnet`] values as `T`.
///
/// # Example
///
/// ```
/// use tnetstring::prelude::*;
///
/// let t_values = vec![1, 2, 3].into_tnet().into_vec().unwrap();
///
/// let first: u8 = pop_tnet(&mut t_values.into_iter()).unwrap();
/// assert_eq!(first, 1);
/// ```
pub fn pop_tnet<T: TnetRep>(iter: &mut IntoIter<Tnet>) -> Option<T> {
    TnetRep::from_tnet(iter.next()?)
}
