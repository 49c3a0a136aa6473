use tracing::debug;

use super::MixinProcessor;
use crate::annotation::{Annotation, AnnotationArgs, Declaration, MixinAnnotation, Value};
use crate::error::Result;
use crate::info::InterfaceInfo;

const KIND: MixinAnnotation = MixinAnnotation::Interface;

impl MixinProcessor<'_> {
	/// `@Interface(iface = X.class, prefix = "x$")` on a type: methods named
	/// `prefix + name` soft-implement `X`.
	///
	/// May appear before the type's `@Mixin`, so the registry entry is created
	/// on demand.
	pub(super) fn process_interface(&mut self, annotation: &Annotation, declaration: &Declaration) -> Result<()> {
		let Declaration::Type { name: owner } = declaration else {
			return Err(self.invalid_target(KIND, annotation, declaration));
		};
		let AnnotationArgs::Normal(pairs) = &annotation.args else {
			return Err(self.invalid_argument(KIND, annotation, "@Interface needs iface and prefix members"));
		};

		let mut prefix = None;
		let mut iface = None;
		for (member, value) in pairs {
			match (member.as_str(), value) {
				("unique" | "remap", _) => {}
				("prefix", value) => prefix = Some(self.expect_str(KIND, annotation, "prefix", value)?.value.clone()),
				("iface", Value::Type(ty)) => iface = Some(ty.internal_name.clone()),
				("iface", other) => {
					return Err(self.invalid_argument(
						KIND,
						annotation,
						format!("iface must be a class literal, found {other}"),
					));
				}
				(other, _) => {
					return Err(self.invalid_argument(KIND, annotation, format!("unknown member {other}")));
				}
			}
		}

		let (Some(prefix), Some(iface)) = (prefix, iface) else {
			return Err(self.invalid_argument(KIND, annotation, "@Interface needs iface and prefix members"));
		};

		debug!(owner = %owner, iface = %iface, prefix = %prefix, "registered soft interface");
		self.registry
			.upsert(owner, |info| info.add_interface(InterfaceInfo::new(prefix, iface)));
		Ok(())
	}
}
