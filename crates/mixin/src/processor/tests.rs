use pretty_assertions::assert_eq;
use xrefmap_range::{EntryKind, MemberInfo, MetaEntry, MixinAccessorMeta, RangeEntry, RangeMap, RangeMapBuilder};

use super::*;
use crate::annotation::{AnnotationArgs, TypeLiteral};

const MIXIN: &str = "mixin/AMixin";
const TARGET: &str = "com/Example";

/// Runs annotations through a fresh processor and returns the built map.
struct Harness {
	registry: MixinRegistry,
	options: ProcessorOptions,
}

impl Harness {
	fn new() -> Self {
		Self {
			registry: MixinRegistry::new(),
			options: ProcessorOptions::default(),
		}
	}

	fn lenient() -> Self {
		Self {
			options: ProcessorOptions {
				fatal: false,
				..ProcessorOptions::default()
			},
			..Self::new()
		}
	}

	fn run(&self, steps: &[(Annotation, Declaration)]) -> (Result<()>, RangeMap) {
		let mut builder = RangeMapBuilder::new("mixin/AMixin.java", "h");
		let mut processor = MixinProcessor::new(&self.registry, &mut builder, &self.options);
		let result = steps
			.iter()
			.try_for_each(|(annotation, declaration)| processor.process(annotation, declaration));
		(result, builder.build())
	}

	/// Registers `MIXIN` with the given targets.
	fn with_targets(self, targets: &[&str]) -> Self {
		let value = Value::Array(targets.iter().map(|t| Value::Type(TypeLiteral::new(*t))).collect());
		let (result, _) = self.run(&[(
			annotation(MixinAnnotation::Mixin, AnnotationArgs::Single(value)),
			ty(MIXIN),
		)]);
		assert_eq!(result, Ok(()));
		self
	}
}

fn annotation(kind: MixinAnnotation, args: AnnotationArgs) -> Annotation {
	Annotation::new(kind.type_name(), 100, args)
}

fn named(pairs: &[(&str, Value)]) -> AnnotationArgs {
	AnnotationArgs::Normal(pairs.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect())
}

fn string(start: u32, value: &str) -> Value {
	Value::Str(StringLiteral::quoted(start, value))
}

fn ty(name: &str) -> Declaration {
	Declaration::Type { name: name.into() }
}

fn method(name: &str, desc: &str) -> Declaration {
	Declaration::Method {
		owner: MIXIN.into(),
		name: name.into(),
		desc: desc.into(),
	}
}

fn field(name: &str, desc: &str) -> Declaration {
	Declaration::Field {
		owner: MIXIN.into(),
		fragments: vec![(name.into(), desc.into())],
	}
}

fn accessor_meta(method: &str, desc: &str, target: &str, target_desc: &str, prefix: &str) -> MetaEntry {
	MetaEntry::MixinAccessor(MixinAccessorMeta {
		owner: MemberInfo::new(MIXIN, method, desc),
		target: MemberInfo::new(TARGET, target, target_desc),
		prefix: prefix.into(),
	})
}

#[test]
fn mixin_with_class_literal_registers_single_target() {
	let h = Harness::new().with_targets(&[TARGET]);
	let info = h.registry.get_info(MIXIN).unwrap();
	assert_eq!(info.target(), Some(TARGET));
	assert_eq!(info.owner(), MIXIN);
}

#[test]
fn mixin_string_targets_become_class_literals() {
	let h = Harness::new();
	let (result, map) = h.run(&[(
		annotation(
			MixinAnnotation::Mixin,
			named(&[
				("targets", Value::Array(vec![string(20, "com.Example"), string(40, "com/Other$Inner")])),
				("priority", Value::Other("900".into())),
				("remap", Value::Other("false".into())),
			]),
		),
		ty(MIXIN),
	)]);
	assert_eq!(result, Ok(()));

	assert_eq!(map.entries(), [
		RangeEntry::new(20, 13, "\"com.Example\"", EntryKind::ClassLiteral {
			internal_name: "com/Example".into()
		}),
		RangeEntry::new(40, 17, "\"com/Other$Inner\"", EntryKind::ClassLiteral {
			internal_name: "com/Other$Inner".into()
		}),
	]);
	let info = h.registry.get_info(MIXIN).unwrap();
	assert_eq!(info.target(), None);
	assert_eq!(info.targets().len(), 2);
}

#[test]
fn mixin_single_string_target() {
	let h = Harness::new();
	let (result, map) = h.run(&[(
		annotation(MixinAnnotation::Mixin, named(&[("targets", string(5, "com.Example"))])),
		ty(MIXIN),
	)]);
	assert_eq!(result, Ok(()));
	assert_eq!(map.entries().len(), 1);
	assert_eq!(h.registry.get_info(MIXIN).unwrap().target(), Some(TARGET));
}

#[test]
fn mixin_rejects_bad_arguments_without_side_effects() {
	let h = Harness::new();
	let cases = [
		AnnotationArgs::Marker,
		named(&[("targets", string(5, "a.B")), ("bogus", Value::Other("1".into()))]),
		named(&[("targets", Value::Array(vec![string(5, "a.B"), Value::Other("PREFIX + \"C\"".into())]))]),
		AnnotationArgs::Single(string(5, "a.B")),
	];
	for args in cases {
		let (result, map) = h.run(&[(annotation(MixinAnnotation::Mixin, args), ty(MIXIN))]);
		assert!(
			matches!(result, Err(ResolveError::InvalidAnnotationArgument { .. })),
			"{result:?}"
		);
		assert!(map.entries().is_empty());
	}
	assert!(h.registry.is_empty());
}

#[test]
fn mixin_on_method_is_invalid_target() {
	let h = Harness::new();
	let (result, _) = h.run(&[(
		annotation(MixinAnnotation::Mixin, AnnotationArgs::Single(Value::Type(TypeLiteral::new(TARGET)))),
		method("foo", "()V"),
	)]);
	assert!(matches!(result, Err(ResolveError::InvalidAnnotationTarget { .. })));
}

#[test]
fn getter_convention_links_to_field() {
	let h = Harness::new().with_targets(&[TARGET]);
	let (result, map) = h.run(&[(
		annotation(MixinAnnotation::Accessor, AnnotationArgs::Marker),
		method("getFoo", "()I"),
	)]);
	assert_eq!(result, Ok(()));
	assert!(map.entries().is_empty());
	assert_eq!(map.meta(), [accessor_meta("getFoo", "()I", "foo", "I", "get")]);
}

#[test]
fn setter_convention_links_to_field() {
	let h = Harness::new().with_targets(&[TARGET]);
	let (result, map) = h.run(&[(
		annotation(MixinAnnotation::Accessor, AnnotationArgs::Marker),
		method("setFoo", "(I)V"),
	)]);
	assert_eq!(result, Ok(()));
	assert_eq!(map.meta(), [accessor_meta("setFoo", "(I)V", "foo", "I", "set")]);
}

#[test]
fn explicit_value_rewrites_the_literal() {
	let h = Harness::new().with_targets(&[TARGET]);
	let (result, map) = h.run(&[(
		annotation(MixinAnnotation::Accessor, AnnotationArgs::Single(string(112, "bar"))),
		method("getFoo", "()I"),
	)]);
	assert_eq!(result, Ok(()));
	assert!(map.meta().is_empty());
	assert_eq!(map.entries(), [RangeEntry::new(
		112,
		5,
		"\"bar\"",
		EntryKind::FieldLiteral {
			owner: TARGET.into(),
			name: "bar".into()
		}
	)]);
}

#[test]
fn explicit_value_with_unconventional_name() {
	let h = Harness::new().with_targets(&[TARGET]);
	let (result, map) = h.run(&[
		(
			annotation(MixinAnnotation::Accessor, named(&[("value", string(10, "field_70")), ("remap", Value::Other("false".into()))])),
			method("health", "()F"),
		),
		(
			annotation(MixinAnnotation::Invoker, AnnotationArgs::Single(string(30, "tick"))),
			method("doTick", "(I)V"),
		),
	]);
	assert_eq!(result, Ok(()));
	assert_eq!(map.entries(), [
		RangeEntry::new(10, 10, "\"field_70\"", EntryKind::FieldLiteral {
			owner: TARGET.into(),
			name: "field_70".into()
		}),
		RangeEntry::new(30, 6, "\"tick\"", EntryKind::MethodLiteral {
			owner: TARGET.into(),
			name: "tick".into(),
			desc: "(I)V".into()
		}),
	]);
}

#[test]
fn invoker_proxy_and_factory() {
	let h = Harness::new().with_targets(&[TARGET]);
	let (result, map) = h.run(&[
		(
			annotation(MixinAnnotation::Invoker, AnnotationArgs::Marker),
			method("callTick", "(IZ)V"),
		),
		(
			annotation(MixinAnnotation::Invoker, AnnotationArgs::Marker),
			method("createExample", "(ILjava/lang/String;)Lcom/Example;"),
		),
	]);
	assert_eq!(result, Ok(()));
	assert_eq!(map.meta(), [
		accessor_meta("callTick", "(IZ)V", "tick", "(IZ)V", "call"),
		accessor_meta(
			"createExample",
			"(ILjava/lang/String;)Lcom/Example;",
			"<init>",
			"(ILjava/lang/String;)V",
			"create"
		),
	]);
}

#[test]
fn factory_with_explicit_values() {
	let h = Harness::new().with_targets(&[TARGET]);
	let (result, map) = h.run(&[
		(
			annotation(MixinAnnotation::Invoker, AnnotationArgs::Single(string(10, "<init>"))),
			method("make", "()Lcom/Example;"),
		),
		(
			annotation(MixinAnnotation::Invoker, AnnotationArgs::Single(string(30, "com.Example"))),
			method("newExample", "()Lcom/Example;"),
		),
	]);
	assert_eq!(result, Ok(()));
	assert_eq!(map.entries(), [RangeEntry::new(
		30,
		13,
		"\"com.Example\"",
		EntryKind::ClassLiteral {
			internal_name: TARGET.into()
		}
	)]);

	let (result, map) = h.run(&[(
		annotation(MixinAnnotation::Invoker, AnnotationArgs::Single(string(30, "com.Other"))),
		method("newExample", "()Lcom/Example;"),
	)]);
	assert!(matches!(
		result,
		Err(ResolveError::MixinTargetMismatch { ref expected, ref found, .. }) if expected == TARGET && found == "com/Other"
	));
	assert!(map.entries().is_empty());
}

#[test]
fn accessor_without_convention_is_unresolved() {
	let h = Harness::new().with_targets(&[TARGET]);
	for decl in [method("foo", "()I"), method("getFoo", "(I)I"), method("setFoo", "(I)I")] {
		let (result, map) = h.run(&[(annotation(MixinAnnotation::Accessor, AnnotationArgs::Marker), decl)]);
		let Err(err) = result else {
			panic!("expected an error");
		};
		assert!(matches!(err, ResolveError::UnresolvedAccessorName { .. }), "{err}");
		assert_eq!(err.position().offset, 100);
		assert_eq!(err.annotation(), MixinAnnotation::Accessor);
		assert!(map.meta().is_empty());
	}
}

#[test]
fn accessor_on_multi_target_mixin_is_skipped() {
	let h = Harness::new().with_targets(&[TARGET, "com/Other"]);
	let (result, map) = h.run(&[(
		annotation(MixinAnnotation::Accessor, AnnotationArgs::Marker),
		method("whatever", "()I"),
	)]);
	assert_eq!(result, Ok(()));
	assert!(map.meta().is_empty());
	assert!(map.entries().is_empty());
}

#[test]
fn accessor_rejects_non_string_value() {
	let h = Harness::new().with_targets(&[TARGET]);
	let (result, _) = h.run(&[(
		annotation(MixinAnnotation::Accessor, AnnotationArgs::Single(Value::Other("NAME".into()))),
		method("getFoo", "()I"),
	)]);
	assert!(matches!(result, Err(ResolveError::InvalidAnnotationArgument { .. })));
}

#[test]
fn accessor_without_mixin_is_unresolved_owner() {
	let h = Harness::new();
	let (result, _) = h.run(&[(
		annotation(MixinAnnotation::Accessor, AnnotationArgs::Marker),
		method("getFoo", "()I"),
	)]);
	assert!(matches!(result, Err(ResolveError::UnresolvedMixinOwner { ref owner, .. }) if owner == MIXIN));
}

#[test]
fn shadow_redirects_prefixed_references() {
	let h = Harness::new().with_targets(&[TARGET]);
	let (result, _) = h.run(&[
		(annotation(MixinAnnotation::Shadow, AnnotationArgs::Marker), field("fieldName", "I")),
		(
			annotation(MixinAnnotation::Shadow, named(&[("prefix", string(0, "x$")), ("remap", Value::Other("true".into()))])),
			method("tick", "()V"),
		),
	]);
	assert_eq!(result, Ok(()));

	assert_eq!(
		h.registry.get_shaded_owner(MIXIN, "shadow$fieldName", "I"),
		Some(TARGET.to_string())
	);
	assert_eq!(h.registry.get_shaded_owner(MIXIN, "fieldName", "I"), Some(TARGET.to_string()));
	assert_eq!(h.registry.get_shaded_owner(MIXIN, "x$tick", "()V"), Some(TARGET.to_string()));
	assert_eq!(h.registry.get_shaded_owner(MIXIN, "shadow$tick", "()V"), None);
	assert_eq!(h.registry.get_shadow(MIXIN, "tick", "()V").unwrap().prefix, "x$");
}

#[test]
fn shadow_on_every_field_fragment() {
	let h = Harness::new().with_targets(&[TARGET]);
	let decl = Declaration::Field {
		owner: MIXIN.into(),
		fragments: vec![("a".into(), "I".into()), ("b".into(), "I".into())],
	};
	let (result, _) = h.run(&[(annotation(MixinAnnotation::Shadow, AnnotationArgs::Marker), decl)]);
	assert_eq!(result, Ok(()));
	assert!(h.registry.get_shadow(MIXIN, "a", "I").is_some());
	assert!(h.registry.get_shadow(MIXIN, "b", "I").is_some());
}

#[test]
fn custom_default_shadow_prefix() {
	let h = Harness {
		options: ProcessorOptions {
			shadow_prefix: "s$".into(),
			..ProcessorOptions::default()
		},
		..Harness::new()
	}
	.with_targets(&[TARGET]);
	let (result, _) = h.run(&[(annotation(MixinAnnotation::Shadow, AnnotationArgs::Marker), field("x", "J"))]);
	assert_eq!(result, Ok(()));
	assert_eq!(h.registry.get_shaded_owner(MIXIN, "s$x", "J"), Some(TARGET.to_string()));
}

#[test]
fn shadow_without_mixin_does_not_mutate() {
	let h = Harness::new();
	let (result, _) = h.run(&[(annotation(MixinAnnotation::Shadow, AnnotationArgs::Marker), field("x", "I"))]);
	assert!(matches!(result, Err(ResolveError::UnresolvedMixinOwner { .. })));
	assert!(h.registry.is_empty());
	assert!(!h.registry.contains(MIXIN));
}

#[test]
fn shadow_rejects_bad_arguments() {
	let h = Harness::new().with_targets(&[TARGET]);
	for args in [
		AnnotationArgs::Single(string(0, "x")),
		named(&[("prefix", Value::Other("PREFIX".into()))]),
		named(&[("value", string(0, "x"))]),
	] {
		let (result, _) = h.run(&[(annotation(MixinAnnotation::Shadow, args), field("x", "I"))]);
		assert!(matches!(result, Err(ResolveError::InvalidAnnotationArgument { .. })));
	}
	assert_eq!(h.registry.get_shadow(MIXIN, "x", "I"), None);

	let (result, _) = h.run(&[(annotation(MixinAnnotation::Shadow, AnnotationArgs::Marker), ty(MIXIN))]);
	assert!(matches!(result, Err(ResolveError::InvalidAnnotationTarget { .. })));
}

#[test]
fn lenient_mode_logs_and_continues() {
	let h = Harness::lenient();
	let (result, map) = h.run(&[
		(annotation(MixinAnnotation::Shadow, AnnotationArgs::Marker), field("x", "I")),
		(
			annotation(MixinAnnotation::Mixin, AnnotationArgs::Single(Value::Type(TypeLiteral::new(TARGET)))),
			ty(MIXIN),
		),
	]);
	assert_eq!(result, Ok(()));
	assert!(map.entries().is_empty());
	assert!(h.registry.contains(MIXIN));
	assert_eq!(h.registry.get_shadow(MIXIN, "x", "I"), None);
}

#[test]
fn unknown_annotations_are_ignored() {
	let h = Harness::new();
	let (result, map) = h.run(&[(
		Annotation::new("java/lang/Override", 3, AnnotationArgs::Marker),
		method("toString", "()Ljava/lang/String;"),
	)]);
	assert_eq!(result, Ok(()));
	assert!(map.entries().is_empty());
	assert!(h.registry.is_empty());
}

#[test]
fn overwrite_is_recorded() {
	let h = Harness::new().with_targets(&[TARGET]);
	let (result, _) = h.run(&[(
		annotation(MixinAnnotation::Overwrite, named(&[("constraints", string(0, "FORGE(1+)"))])),
		method("tick", "()V"),
	)]);
	assert_eq!(result, Ok(()));
	assert!(h.registry.is_overwrite(MIXIN, "tick", "()V"));
	assert!(!h.registry.is_overwrite(MIXIN, "tick", "(I)V"));

	let (result, _) = h.run(&[(annotation(MixinAnnotation::Overwrite, AnnotationArgs::Marker), field("x", "I"))]);
	assert!(matches!(result, Err(ResolveError::InvalidAnnotationTarget { .. })));
}

#[test]
fn interface_before_mixin_keeps_both() {
	let h = Harness::new();
	let (result, _) = h.run(&[
		(
			annotation(
				MixinAnnotation::Interface,
				named(&[
					("iface", Value::Type(TypeLiteral::new("com/api/Thing"))),
					("prefix", string(0, "api$")),
					("unique", Value::Other("true".into())),
				]),
			),
			ty(MIXIN),
		),
		(
			annotation(MixinAnnotation::Mixin, AnnotationArgs::Single(Value::Type(TypeLiteral::new(TARGET)))),
			ty(MIXIN),
		),
	]);
	assert_eq!(result, Ok(()));

	let info = h.registry.get_info(MIXIN).unwrap();
	assert_eq!(info.target(), Some(TARGET));
	assert_eq!(info.interfaces().len(), 1);
	assert_eq!(info.interfaces()[0].target, "com/api/Thing");
	assert_eq!(info.interfaces()[0].prefix, "api$");
}

#[test]
fn interface_needs_both_members() {
	let h = Harness::new();
	let (result, _) = h.run(&[(
		annotation(MixinAnnotation::Interface, named(&[("prefix", string(0, "api$"))])),
		ty(MIXIN),
	)]);
	assert!(matches!(result, Err(ResolveError::InvalidAnnotationArgument { .. })));
	assert!(h.registry.is_empty());
}

#[test]
fn interface_alone_does_not_register_a_mixin() {
	let h = Harness::new();
	let (result, _) = h.run(&[(
		annotation(
			MixinAnnotation::Interface,
			named(&[
				("iface", Value::Type(TypeLiteral::new("com/api/Thing"))),
				("prefix", string(0, "api$")),
			]),
		),
		ty(MIXIN),
	)]);
	assert_eq!(result, Ok(()));

	let (result, _) = h.run(&[(annotation(MixinAnnotation::Shadow, AnnotationArgs::Marker), field("x", "I"))]);
	assert!(matches!(result, Err(ResolveError::UnresolvedMixinOwner { ref owner, .. }) if owner == MIXIN));

	let (result, _) = h.run(&[(annotation(MixinAnnotation::Overwrite, AnnotationArgs::Marker), method("tick", "()V"))]);
	assert!(matches!(result, Err(ResolveError::UnresolvedMixinOwner { .. })));

	let (result, map) = h.run(&[(annotation(MixinAnnotation::Accessor, AnnotationArgs::Marker), method("getFoo", "()I"))]);
	assert!(matches!(result, Err(ResolveError::UnresolvedMixinOwner { .. })));
	assert!(map.meta().is_empty());

	let info = h.registry.get_info(MIXIN).unwrap();
	assert!(info.shadows().next().is_none());
	assert!(!info.is_overwrite("tick", "()V"));
	assert_eq!(info.interfaces().len(), 1);
}

#[test]
fn field_owner_follows_shadows() {
	let h = Harness::new().with_targets(&[TARGET]);
	h.run(&[(annotation(MixinAnnotation::Shadow, AnnotationArgs::Marker), field("x", "I"))])
		.0
		.unwrap();

	let mut builder = RangeMapBuilder::new("mixin/AMixin.java", "h");
	let processor = MixinProcessor::new(&h.registry, &mut builder, &h.options);
	assert_eq!(processor.field_owner(MIXIN, "x", "I"), TARGET);
	assert_eq!(processor.field_owner(MIXIN, "y", "I"), MIXIN);
	assert_eq!(processor.field_owner("other/Type", "x", "I"), "other/Type");
}

#[test]
fn method_reference_trims_shadow_prefix() {
	let h = Harness::new().with_targets(&[TARGET]);
	h.run(&[(annotation(MixinAnnotation::Shadow, AnnotationArgs::Marker), method("tick", "()V"))])
		.0
		.unwrap();

	let mut builder = RangeMapBuilder::new("mixin/AMixin.java", "h");
	let mut processor = MixinProcessor::new(&h.registry, &mut builder, &h.options);
	assert!(processor.process_method_reference(50, 11, "shadow$tick", MIXIN, "shadow$tick", "()V"));
	assert!(processor.process_method_reference(70, 4, "tick", MIXIN, "tick", "()V"));
	assert!(!processor.process_method_reference(90, 4, "stop", MIXIN, "stop", "()V"));
	assert!(!processor.process_method_reference(90, 4, "tick", "other/Type", "tick", "()V"));

	let method_ref = |start, length, text: &str| {
		RangeEntry::new(start, length, text, EntryKind::Method {
			owner: TARGET.into(),
			name: "tick".into(),
			desc: "()V".into(),
		})
	};
	assert_eq!(builder.build().entries(), [method_ref(57, 4, "tick"), method_ref(70, 4, "tick")]);
}
