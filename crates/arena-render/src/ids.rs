use core::fmt;

macro_rules! render_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

render_id!(
    /// Vertex positions owned by the render backend.
    VertexPositionBufferId
);
render_id!(
    /// Per-vertex normals or texture coordinates.
    VertexAttributeBufferId
);
render_id!(IndexBufferId);
render_id!(ObjectTextureId);
