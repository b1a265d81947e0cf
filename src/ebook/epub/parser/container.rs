use crate::ebook::epub::consts;
use crate::ebook::epub::parser::EpubParser;
use crate::ebook::errors::ParseError;
use crate::parser::ParserResult;
use crate::parser::xml::{XmlElement, XmlReader};
use crate::util::uri;
use quick_xml::events::Event;

impl EpubParser<'_> {
    /// Parses `META-INF/container.xml` and retrieves the package `.opf` file location.
    pub(super) fn parse_container(&self, data: &[u8]) -> ParserResult<String> {
        let mut reader = XmlReader::new(consts::CONTAINER, data);

        while let Some(event) = reader.next() {
            let el = match event? {
                Event::Start(el) if el.is_local_name(consts::ROOT_FILE) => el,
                _ => continue,
            };
            // Although rare, multiple package.opf locations could exist.
            // Only accept the first path as it is the default
            let media_type = el.get_attribute(consts::MEDIA_TYPE)?;
            let Some(package_file) = el.get_attribute(consts::FULL_PATH)? else {
                continue;
            };
            if media_type.is_some_and(|media_type| media_type != consts::PACKAGE_TYPE) {
                continue;
            }

            // `full-path` is always relative to the container root
            return Ok(uri::to_container_path("", &package_file));
        }
        Err(ParseError::NoOpfReference)
    }
}
