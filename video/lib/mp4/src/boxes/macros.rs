macro_rules! match_helper {
    ([size] $expr:expr, $($name:tt,)*) => {
        match $expr {
            $(
                Self::$name(box_) => box_.size(),
            )*
            Self::Unknown((_, data)) => BoxHeader::size_for(data.len() as u64),
        }
    };
    ([write] $expr:expr, $writer:expr, $($name:tt,)*) => {
        match $expr {
            $(
                Self::$name(box_) => box_.mux($writer)?,
            )*
            Self::Unknown((header, data)) => {
                header.mux($writer, BoxHeader::size_for(data.len() as u64))?;
                $writer.write_all(data)?;
            }
        }
    };
    ([parse] $expr:expr, $header:expr, $data:expr, $($name:tt,)*) => {
        match $expr {
            $(
                &$name::NAME => Ok(Self::$name(<$name>::demux($header, $data)?)),
            )*
            _ => Ok(Self::Unknown(($header, $data))),
        }
    };
    ([name] $expr:expr, $($name:tt,)*) => {
        match $expr {
            $(
                Self::$name(_) => $name::NAME,
            )*
            Self::Unknown((header, _)) => header.box_type,
        }
    };
}

macro_rules! as_fn {
    ($($type:tt,)*) => {
        $(
            paste! {
                #[allow(dead_code)]
                pub fn [<as_ $type:lower>](&self) -> Option<&$type> {
                    match self {
                        Self::$type(box_) => Some(box_),
                        _ => None,
                    }
                }
            }
        )*
    };
}

macro_rules! impl_from {
    ($($type:tt,)*) => {
        $(
            impl From<$type> for DynBox {
                fn from(box_: $type) -> Self {
                    Self::$type(box_)
                }
            }
        )*
    };
}

/// Builds `DynBox`, the closed set of boxes this crate can read and write,
/// with `Unknown` carrying anything else through untouched.
macro_rules! impl_box {
    ($($type:tt,)*) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum DynBox {
            $(
                $type($type),
            )*
            Unknown((BoxHeader, Bytes)),
        }

        impl DynBox {
            pub fn size(&self) -> u64 {
                match_helper!(
                    [size] self,
                    $($type,)*
                )
            }

            pub fn name(&self) -> [u8; 4] {
                match_helper!(
                    [name] self,
                    $($type,)*
                )
            }

            pub fn mux<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
                match_helper!(
                    [write] self, writer,
                    $($type,)*
                );

                Ok(())
            }

            pub fn demux(reader: &mut io::Cursor<Bytes>) -> io::Result<Self> {
                let (header, data) = BoxHeader::demux(reader)?;

                match_helper!(
                    [parse] & header.box_type,
                    header,
                    data,
                    $($type,)*
                )
            }

            /// Parses every top level box in `data`.
            pub fn demux_all(data: Bytes) -> io::Result<Vec<Self>> {
                let mut reader = io::Cursor::new(data);
                let mut boxes = Vec::new();

                while reader.has_remaining() {
                    boxes.push(Self::demux(&mut reader)?);
                }

                Ok(boxes)
            }

            as_fn!(
                $($type,)*
            );
        }

        impl_from!(
            $($type,)*
        );
    };
}
