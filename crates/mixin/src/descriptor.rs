//! JVM method descriptors.

use std::fmt;

/// A parsed method descriptor such as `(ILjava/lang/String;)V`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
	params: Vec<String>,
	ret: String,
}

impl MethodDescriptor {
	/// Parses a method descriptor, returning `None` if it is malformed.
	pub fn parse(desc: &str) -> Option<Self> {
		let rest = desc.strip_prefix('(')?;
		let (mut params_src, ret_src) = rest.split_once(')')?;

		let mut params = Vec::new();
		while !params_src.is_empty() {
			let len = field_type_len(params_src)?;
			let (param, tail) = params_src.split_at(len);
			if param == "V" {
				return None;
			}
			params.push(param.to_string());
			params_src = tail;
		}

		if field_type_len(ret_src)? != ret_src.len() {
			return None;
		}

		Some(Self {
			params,
			ret: ret_src.to_string(),
		})
	}

	pub fn params(&self) -> &[String] {
		&self.params
	}

	pub fn return_type(&self) -> &str {
		&self.ret
	}

	pub fn returns_void(&self) -> bool {
		self.ret == "V"
	}

	/// The same parameters with a `void` return, as every constructor has.
	pub fn with_void_return(&self) -> Self {
		Self {
			params: self.params.clone(),
			ret: "V".into(),
		}
	}
}

impl fmt::Display for MethodDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}){}", self.params.concat(), self.ret)
	}
}

/// Length in bytes of the single field type at the start of `src`.
fn field_type_len(src: &str) -> Option<usize> {
	let dims = src.bytes().take_while(|&b| b == b'[').count();
	let elem = &src[dims..];
	let elem_len = match elem.as_bytes().first()? {
		b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' => 1,
		b'V' if dims == 0 => 1,
		b'L' => elem.find(';').filter(|&end| end > 1)? + 1,
		_ => return None,
	};
	Some(dims + elem_len)
}
