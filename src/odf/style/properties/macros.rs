/// Declare a node-backed property type with its known attribute set and
/// creation defaults.
macro_rules! typed_property {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:expr, $known:ident, defaults: [$(($dattr:literal, $dvalue:literal)),* $(,)?]
        $(, absorb: $absorb:ident)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            node: $crate::odf::dom::NodeId,
        }

        impl $crate::odf::content::NodeBacked for $name {
            fn node(&self) -> $crate::odf::dom::NodeId {
                self.node
            }
        }

        impl $name {
            pub fn node(&self) -> $crate::odf::dom::NodeId {
                self.node
            }
        }

        impl $crate::odf::style::properties::TypedProperty for $name {
            const KIND: $crate::odf::style::properties::PropertyKind = $kind;

            fn empty(ctx: &mut $crate::odf::document::DocumentContext) -> Self {
                Self { node: ctx.element(Self::KIND.tag()) }
            }

            fn apply_defaults(&mut self, _ctx: &mut $crate::odf::document::DocumentContext) -> $crate::common::Result<()> {
                $( _ctx.store_mut().set_attribute(self.node, $dattr, $dvalue)?; )*
                Ok(())
            }

            fn known_attributes() -> &'static phf::Set<&'static str> {
                &$known
            }

            $(
                fn absorb_children(
                    &mut self,
                    ctx: &mut $crate::odf::document::DocumentContext,
                    raw: $crate::odf::dom::NodeId,
                ) -> $crate::common::Result<()> {
                    self.$absorb(ctx, raw)
                }
            )?

            fn into_property(self) -> $crate::odf::style::properties::Property {
                $crate::odf::style::properties::Property::from(self)
            }

            fn from_property(property: &$crate::odf::style::properties::Property) -> Option<&Self> {
                match property {
                    $crate::odf::style::properties::Property::$name(p) => Some(p),
                    _ => None,
                }
            }

            fn from_property_mut(property: &mut $crate::odf::style::properties::Property) -> Option<&mut Self> {
                match property {
                    $crate::odf::style::properties::Property::$name(p) => Some(p),
                    _ => None,
                }
            }
        }

        impl From<$name> for $crate::odf::style::properties::Property {
            fn from(value: $name) -> Self {
                $crate::odf::style::properties::Property::$name(value)
            }
        }
    };
}

/// String-valued attribute accessor pairs.
macro_rules! string_attributes {
    ($($(#[$meta:meta])* $get:ident, $set:ident => $attr:literal;)*) => {
        $(
            $(#[$meta])*
            pub fn $get<'a>(&self, store: &'a $crate::odf::dom::NodeStore) -> Option<&'a str> {
                store.attribute(self.node, $attr)
            }

            pub fn $set(&self, ctx: &mut $crate::odf::document::DocumentContext, value: &str) -> $crate::common::Result<()> {
                ctx.store_mut().set_attribute(self.node, $attr, value)
            }
        )*
    };
}

/// Boolean attribute accessor pairs serialised as `true`/`false`.
macro_rules! bool_attributes {
    ($($(#[$meta:meta])* $get:ident, $set:ident => $attr:literal;)*) => {
        $(
            $(#[$meta])*
            pub fn $get(&self, store: &$crate::odf::dom::NodeStore) -> Option<bool> {
                store.attribute(self.node, $attr).and_then($crate::odf::constants::parse_bool)
            }

            pub fn $set(&self, ctx: &mut $crate::odf::document::DocumentContext, value: bool) -> $crate::common::Result<()> {
                ctx.store_mut()
                    .set_attribute(self.node, $attr, $crate::odf::constants::bool_str(value))
            }
        )*
    };
}
