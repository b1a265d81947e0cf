// General
pub(crate) const ID: &str = "id";
pub(crate) const HREF: &str = "href";
pub(crate) const LANG: &str = "xml:lang";

// Paths
pub(crate) const CONTAINER: &str = "META-INF/container.xml";

// Container
pub(crate) const ROOT_FILE: &str = "rootfile";
pub(crate) const FULL_PATH: &str = "full-path";

// Package attributes
pub(crate) const VERSION: &str = "version";
pub(crate) const UNIQUE_ID: &str = "unique-identifier";
pub(crate) const PREFIX: &str = "prefix";

// Metadata attributes
pub(crate) const PROPERTY: &str = "property";
pub(crate) const NAME: &str = "name";
pub(crate) const CONTENT: &str = "content";
pub(crate) const REFINES: &str = "refines";
pub(crate) const SCHEME: &str = "scheme";
pub(crate) const DC_PREFIX: &str = "dc";
pub(crate) const OPF_PREFIX: &str = "opf";
pub(crate) const META: &str = "meta";
pub(crate) const LINK: &str = "link";
pub(crate) const REL: &str = "rel";

// Manifest attributes
pub(crate) const MEDIA_TYPE: &str = "media-type";
pub(crate) const PROPERTIES: &str = "properties";
pub(crate) const NAV_PROPERTY: &str = "nav";

// Spine attributes
pub(crate) const IDREF: &str = "idref";
pub(crate) const LINEAR: &str = "linear";
pub(crate) const TOC: &str = "toc";

// Guide attributes
pub(crate) const TITLE: &str = "title";
pub(crate) const TYPE: &str = "type";

// Navigation attributes
pub(crate) const EPUB_TYPE: &str = "epub:type";
pub(crate) const SRC: &str = "src";

// Media types
pub(crate) const PACKAGE_TYPE: &str = "application/oebps-package+xml";
pub(crate) const NCX_TYPE: &str = "application/x-dtbncx+xml";

/// Namespace URIs and the prefixes reserved by EPUB 3.
pub(crate) mod ns {
    pub(crate) const DC: &str = "http://purl.org/dc/elements/1.1/";
    pub(crate) const DCTERMS: &str = "http://purl.org/dc/terms/";
    pub(crate) const OPF: &str = "http://www.idpf.org/2007/opf";
    /// Default vocabulary of unprefixed `meta@property` values.
    pub(crate) const META: &str = "http://idpf.org/epub/vocab/package/meta/#";
    pub(crate) const RENDITION: &str = "http://www.idpf.org/vocab/rendition/#";

    /// Prefixes usable without a `package@prefix` declaration.
    pub(crate) const RESERVED: &[(&str, &str)] = &[
        ("a11y", "http://www.idpf.org/epub/vocab/package/a11y/#"),
        ("dcterms", DCTERMS),
        ("marc", "http://id.loc.gov/vocabulary/"),
        ("media", "http://www.idpf.org/epub/vocab/overlays/#"),
        ("onix", "http://www.editeur.org/ONIX/book/codelists/current.html#"),
        ("rendition", RENDITION),
        ("schema", "http://schema.org/"),
        ("xsd", "http://www.w3.org/2001/XMLSchema#"),
        ("msv", "http://www.idpf.org/epub/vocab/structure/magazine/#"),
        ("prism", "http://www.prismstandard.org/specifications/3.0/PRISM_CV_Spec_3.0.htm#"),
    ];
}

// Element names where calling `str::as_bytes` is not possible
pub(crate) mod bytes {
    pub(crate) const PACKAGE: &[u8] = b"package";
    pub(crate) const METADATA: &[u8] = b"metadata";
    pub(crate) const MANIFEST: &[u8] = b"manifest";
    pub(crate) const SPINE: &[u8] = b"spine";
    pub(crate) const GUIDE: &[u8] = b"guide";

    pub(crate) const ITEM: &[u8] = b"item";
    pub(crate) const ITEMREF: &[u8] = b"itemref";
    pub(crate) const REFERENCE: &[u8] = b"reference";

    // EPUB 3 navigation document
    pub(crate) const NAV: &[u8] = b"nav";
    pub(crate) const LIST_ITEM: &[u8] = b"li";
    pub(crate) const ANCHOR: &[u8] = b"a";
    pub(crate) const SPAN: &[u8] = b"span";
    pub(crate) const HEADINGS: &[&[u8]] = &[b"h1", b"h2", b"h3", b"h4", b"h5", b"h6"];

    // EPUB 2 NCX
    pub(crate) const DOC_TITLE: &[u8] = b"docTitle";
    pub(crate) const NAV_MAP: &[u8] = b"navMap";
    pub(crate) const PAGE_LIST: &[u8] = b"pageList";
    pub(crate) const NAV_POINT: &[u8] = b"navPoint";
    pub(crate) const PAGE_TARGET: &[u8] = b"pageTarget";
    pub(crate) const NAV_LABEL: &[u8] = b"navLabel";
    pub(crate) const CONTENT: &[u8] = b"content";
}
