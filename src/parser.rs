pub(crate) mod xml;

use crate::ebook::errors::ParseError;

pub(crate) type ParserResult<T> = Result<T, ParseError>;
