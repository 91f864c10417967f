macro_rules! names {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:expr,)+ }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        #[allow(missing_docs)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Parses a name.
            pub fn from_str(text: &str) -> Option<Self> {
                match text {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Returns the name as written in a document.
            pub fn to_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}", self.to_str())
            }
        }
    };
}

names!(
    /// A list of SVG elements with a dedicated meaning.
    ElementId {
        Circle      => "circle",
        Defs        => "defs",
        Ellipse     => "ellipse",
        G           => "g",
        Line        => "line",
        Path        => "path",
        Polygon     => "polygon",
        Polyline    => "polyline",
        Rect        => "rect",
        Svg         => "svg",
        Text        => "text",
        Tref        => "tref",
        Tspan       => "tspan",
        Use         => "use",
    }
);

names!(
    /// A list of SVG attributes with a dedicated meaning.
    AttributeId {
        Color           => "color",
        Cx              => "cx",
        Cy              => "cy",
        D               => "d",
        Dx              => "dx",
        Dy              => "dy",
        Fill            => "fill",
        FillOpacity     => "fill-opacity",
        FillRule        => "fill-rule",
        FontFamily      => "font-family",
        FontSize        => "font-size",
        FontStyle       => "font-style",
        FontWeight      => "font-weight",
        Height          => "height",
        Href            => "href",
        Id              => "id",
        Opacity         => "opacity",
        Points          => "points",
        R               => "r",
        Rx              => "rx",
        Ry              => "ry",
        Stroke          => "stroke",
        StrokeOpacity   => "stroke-opacity",
        StrokeWidth     => "stroke-width",
        Style           => "style",
        TextAnchor      => "text-anchor",
        Transform       => "transform",
        ViewBox         => "viewBox",
        Width           => "width",
        X               => "x",
        X1              => "x1",
        X2              => "x2",
        Y               => "y",
        Y1              => "y1",
        Y2              => "y2",
    }
);
