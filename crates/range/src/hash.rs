/// Hash identifying the source content an index was built against.
///
/// Lowercase hex MD5 of the raw bytes, so an index stays valid regardless of the
/// encoding used to decode the file.
pub fn content_hash(content: impl AsRef<[u8]>) -> String {
	format!("{:x}", md5::compute(content))
}
