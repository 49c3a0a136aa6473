use tracing::debug;
use xrefmap_range::MemberInfo;

use super::MixinProcessor;
use crate::accessor::{AccessorName, AccessorType};
use crate::annotation::{Annotation, AnnotationArgs, Declaration, MixinAnnotation, StringLiteral};
use crate::descriptor::MethodDescriptor;
use crate::error::{ResolveError, Result};
use crate::info::MixinInfo;

impl MixinProcessor<'_> {
	/// `@Accessor` or `@Invoker` on a method.
	///
	/// Without a value the accessor method is linked to its target with a meta
	/// entry. With a value, the string literal itself names the target, so it is
	/// recorded as a field, method or class literal instead. Multi-target mixins
	/// are skipped since the target cannot be known.
	pub(super) fn process_accessor(
		&mut self,
		kind: MixinAnnotation,
		annotation: &Annotation,
		declaration: &Declaration,
	) -> Result<()> {
		let Declaration::Method { owner, name, desc } = declaration else {
			return Err(self.invalid_target(kind, annotation, declaration));
		};

		let value = self.accessor_value(kind, annotation)?;

		let Some(info) = self.registry.get_info(owner).filter(MixinInfo::is_valid) else {
			return Err(self.unresolved_owner(kind, annotation, owner, declaration));
		};
		let Some(target) = info.target() else {
			debug!(owner = %owner, method = %name, "skipping accessor on multi-target mixin");
			return Ok(());
		};

		let unresolved = || ResolveError::UnresolvedAccessorName {
			position: self.position(annotation),
			annotation: kind,
			owner: owner.clone(),
			method: name.clone(),
			desc: desc.clone(),
		};

		let parsed = MethodDescriptor::parse(desc).ok_or_else(unresolved)?;
		let accessor = AccessorName::from(name, value.map(|lit| lit.value.as_str()), &parsed)
			.or_else(|| {
				let lit = value?;
				match kind {
					MixinAnnotation::Invoker => Some(AccessorName::for_method(name, &lit.value)),
					_ => AccessorName::for_field(name, &lit.value, &parsed),
				}
			})
			.ok_or_else(unresolved)?;

		let accessor_member = MemberInfo::new(info.owner(), accessor.method.as_str(), desc.as_str());

		match accessor.ty {
			AccessorType::Getter | AccessorType::Setter => {
				let field_desc = if accessor.ty == AccessorType::Getter {
					parsed.return_type()
				} else {
					parsed.params().first().map(String::as_str).ok_or_else(unresolved)?
				};
				match value {
					Some(lit) => self.builder.add_field_literal(
						lit.start,
						lit.length,
						lit.escaped.as_str(),
						target,
						accessor.target.as_str(),
					),
					None => self.builder.add_mixin_accessor(
						accessor_member,
						MemberInfo::new(target, accessor.target.as_str(), field_desc),
						accessor.prefix.as_str(),
					),
				}
			}
			AccessorType::Proxy => match value {
				Some(lit) => self.builder.add_method_literal(
					lit.start,
					lit.length,
					lit.escaped.as_str(),
					target,
					accessor.target.as_str(),
					desc.as_str(),
				),
				None => self.builder.add_mixin_accessor(
					accessor_member,
					MemberInfo::new(target, accessor.target.as_str(), desc.as_str()),
					accessor.prefix.as_str(),
				),
			},
			AccessorType::Factory => match value {
				Some(lit) if lit.value == "<init>" => {}
				Some(lit) => {
					let named = lit.value.replace('.', "/");
					if named != target {
						return Err(ResolveError::MixinTargetMismatch {
							position: self.position(annotation),
							annotation: kind,
							expected: target.to_string(),
							found: named,
						});
					}
					self.builder
						.add_class_literal(lit.start, lit.length, lit.escaped.as_str(), target);
				}
				None => self.builder.add_mixin_accessor(
					accessor_member,
					MemberInfo::new(target, "<init>", parsed.with_void_return().to_string()),
					accessor.prefix.as_str(),
				),
			},
		}
		Ok(())
	}

	/// The optional explicit target; `remap` is the only other member.
	fn accessor_value<'v>(&self, kind: MixinAnnotation, annotation: &'v Annotation) -> Result<Option<&'v StringLiteral>> {
		match &annotation.args {
			AnnotationArgs::Marker => Ok(None),
			AnnotationArgs::Single(value) => self.expect_str(kind, annotation, "value", value).map(Some),
			AnnotationArgs::Normal(pairs) => {
				let mut found = None;
				for (member, value) in pairs {
					match member.as_str() {
						"remap" => {}
						"value" => found = Some(self.expect_str(kind, annotation, "value", value)?),
						other => {
							return Err(self.invalid_argument(kind, annotation, format!("unknown member {other}")));
						}
					}
				}
				Ok(found)
			}
		}
	}
}
