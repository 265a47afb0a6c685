use std::fmt;

/// Number of dash-separated fields in a well-formed XLFD name
pub const FIELD_COUNT: usize = 14;

/// Field positions of an X Logical Font Description
///
/// `-foundry-family-weight-slant-width-addstyle-pixels-points-resx-resy-spacing-avgwidth-registry-encoding`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Foundry,
    Family,
    Weight,
    Slant,
    Width,
    AddStyle,
    PixelSize,
    PointSize,
    ResolutionX,
    ResolutionY,
    Spacing,
    AverageWidth,
    CharsetRegistry,
    CharsetEncoding,
}

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Foundry,
        Field::Family,
        Field::Weight,
        Field::Slant,
        Field::Width,
        Field::AddStyle,
        Field::PixelSize,
        Field::PointSize,
        Field::ResolutionX,
        Field::ResolutionY,
        Field::Spacing,
        Field::AverageWidth,
        Field::CharsetRegistry,
        Field::CharsetEncoding,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Foundry => "FOUNDRY",
            Field::Family => "FAMILY_NAME",
            Field::Weight => "WEIGHT_NAME",
            Field::Slant => "SLANT",
            Field::Width => "SETWIDTH_NAME",
            Field::AddStyle => "ADD_STYLE_NAME",
            Field::PixelSize => "PIXEL_SIZE",
            Field::PointSize => "POINT_SIZE",
            Field::ResolutionX => "RESOLUTION_X",
            Field::ResolutionY => "RESOLUTION_Y",
            Field::Spacing => "SPACING",
            Field::AverageWidth => "AVERAGE_WIDTH",
            Field::CharsetRegistry => "CHARSET_REGISTRY",
            Field::CharsetEncoding => "CHARSET_ENCODING",
        }
    }
}

/// Errors produced while parsing a font name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XlfdError {
    /// The name does not start with `-`, e.g. aliases such as `fixed`
    MissingLeadingDash,
    /// The name splits into the wrong number of fields
    WrongFieldCount { found: usize },
}

impl fmt::Display for XlfdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XlfdError::MissingLeadingDash => write!(f, "XLFD name must start with '-'"),
            XlfdError::WrongFieldCount { found } => {
                write!(f, "XLFD name has {} fields (expected {})", found, FIELD_COUNT)
            }
        }
    }
}

impl std::error::Error for XlfdError {}

/// Borrowed view over the fields of an XLFD name
///
/// Parsing never allocates; every accessor returns a slice of the
/// original string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XlfdName<'a> {
    fields: [&'a str; FIELD_COUNT],
}

impl<'a> XlfdName<'a> {
    pub fn parse(name: &'a str) -> Result<Self, XlfdError> {
        let rest = name.strip_prefix('-').ok_or(XlfdError::MissingLeadingDash)?;

        let dashes = memchr::memchr_iter(b'-', rest.as_bytes()).count();
        if dashes != FIELD_COUNT - 1 {
            return Err(XlfdError::WrongFieldCount { found: dashes + 1 });
        }

        let mut fields = [""; FIELD_COUNT];
        for (slot, part) in fields.iter_mut().zip(rest.split('-')) {
            *slot = part;
        }

        Ok(Self { fields })
    }

    #[inline]
    pub fn field(&self, field: Field) -> &'a str {
        self.fields[field.index()]
    }

    pub fn foundry(&self) -> &'a str {
        self.field(Field::Foundry)
    }

    pub fn family(&self) -> &'a str {
        self.field(Field::Family)
    }

    pub fn weight(&self) -> &'a str {
        self.field(Field::Weight)
    }

    pub fn slant(&self) -> &'a str {
        self.field(Field::Slant)
    }

    pub fn width(&self) -> &'a str {
        self.field(Field::Width)
    }

    pub fn add_style(&self) -> &'a str {
        self.field(Field::AddStyle)
    }

    pub fn spacing(&self) -> &'a str {
        self.field(Field::Spacing)
    }

    pub fn charset_registry(&self) -> &'a str {
        self.field(Field::CharsetRegistry)
    }

    pub fn charset_encoding(&self) -> &'a str {
        self.field(Field::CharsetEncoding)
    }

    /// Numeric value of a field, `None` for wildcards and garbage
    pub fn numeric(&self, field: Field) -> Option<u32> {
        self.field(field).parse().ok()
    }

    /// Point size in tenths of a point
    pub fn point_size_deci(&self) -> Option<u32> {
        self.numeric(Field::PointSize)
    }

    pub fn pixel_size(&self) -> Option<u32> {
        self.numeric(Field::PixelSize)
    }

    pub fn resolution(&self) -> Option<(u32, u32)> {
        Some((
            self.numeric(Field::ResolutionX)?,
            self.numeric(Field::ResolutionY)?,
        ))
    }

    /// True when the field is the literal `0`
    #[inline]
    pub fn is_zero(&self, field: Field) -> bool {
        self.field(field) == "0"
    }

    /// Weight, slant or width left open by the font
    pub fn is_polymorphic(&self) -> bool {
        self.is_zero(Field::Weight) || self.is_zero(Field::Slant) || self.is_zero(Field::Width)
    }

    /// Pixel size, point size and average width all zero: an outline font
    pub fn is_scalable(&self) -> bool {
        self.is_zero(Field::PixelSize)
            && self.is_zero(Field::PointSize)
            && self.is_zero(Field::AverageWidth)
    }

    /// Scalable at any resolution as well as any size
    pub fn is_smoothly_scalable(&self) -> bool {
        self.is_scalable() && self.is_zero(Field::ResolutionX) && self.is_zero(Field::ResolutionY)
    }

    /// Lower-cased first character of the slant field (`r`, `i`, `o`, ...)
    pub fn slant_code(&self) -> Option<char> {
        first_lower(self.slant())
    }

    /// Lower-cased first character of the spacing field (`p`, `m`, `c`)
    pub fn spacing_code(&self) -> Option<char> {
        first_lower(self.spacing())
    }

    /// Concrete name for a scalable font at the given size and resolution
    ///
    /// Pixel size and average width are left as wildcards so the server
    /// derives them from the point size.
    pub fn to_scaled(&self, point_size_deci: u32, resolution_x: u32, resolution_y: u32) -> String {
        format!(
            "-{}-{}-{}-{}-{}-{}-*-{}-{}-{}-{}-*-{}-{}",
            self.foundry(),
            self.family(),
            self.weight(),
            self.slant(),
            self.width(),
            self.add_style(),
            point_size_deci,
            resolution_x,
            resolution_y,
            self.spacing(),
            self.charset_registry(),
            self.charset_encoding(),
        )
    }
}

impl fmt::Display for XlfdName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in &self.fields {
            write!(f, "-{}", field)?;
        }
        Ok(())
    }
}

fn first_lower(s: &str) -> Option<char> {
    s.chars().next().map(|c| c.to_ascii_lowercase())
}
