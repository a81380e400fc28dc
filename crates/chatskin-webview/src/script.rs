//! A [`Document`] backed by a live page.
//!
//! Each operation becomes one call into the bootstrap helpers. A pass
//! queues its calls and [`Document::flush`] ships them as a single script
//! over a channel to whichever thread owns the webview. The page cannot
//! answer synchronously, so element counts are not known here: style
//! counts are tracked locally and class or inline operations report zero.

use std::collections::HashMap;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use chatskin_common::DomError;
use chatskin_enforcer::{Anchor, Document, MutationRecord, MutationSink};
use tracing::debug;

/// Where the IPC handler delivers page mutations. Shared between the
/// document, which sets and clears the sink, and the webview host.
#[derive(Debug, Clone, Default)]
pub struct MutationRoute {
    sink: Arc<Mutex<Option<MutationSink>>>,
}

impl MutationRoute {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, sink: MutationSink) {
        *self.lock() = Some(sink);
    }

    fn clear(&self) {
        *self.lock() = None;
    }

    pub fn is_connected(&self) -> bool {
        self.lock().is_some()
    }

    /// Forward a record. Returns false when nothing is listening.
    pub fn deliver(&self, record: MutationRecord) -> bool {
        match self.lock().as_ref() {
            Some(sink) => sink.send(record).is_ok(),
            None => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<MutationSink>> {
        self.sink
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub struct ScriptDocument {
    scripts: Sender<String>,
    route: MutationRoute,
    queued: Vec<String>,
    styles: HashMap<String, usize>,
}

impl ScriptDocument {
    pub fn new(scripts: Sender<String>, route: MutationRoute) -> Self {
        Self {
            scripts,
            route,
            queued: Vec::new(),
            styles: HashMap::new(),
        }
    }

    /// Calls waiting for the next flush.
    pub fn pending(&self) -> &[String] {
        &self.queued
    }

    fn call(&mut self, helper: &str, args: &[&str]) {
        let args: Vec<String> = args.iter().map(|arg| js_string(arg)).collect();
        self.queued
            .push(format!("cs.{helper}({});", args.join(", ")));
    }
}

/// JSON string literals are valid JavaScript string literals.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Wrap each queued call in its own `try`. A throwing call is reported
/// and the calls after it still run.
fn wrap(calls: &[String]) -> String {
    let mut script = String::from("(function() {\n  var cs = window.__chatskin;\n  if (!cs) return;\n");
    for call in calls {
        script.push_str("  try { ");
        script.push_str(call);
        script.push_str(" } catch (e) { cs.report('pass', e); }\n");
    }
    script.push_str("})();\n");
    script
}

impl Document for ScriptDocument {
    /// Readiness arrives as a `ready` IPC message instead.
    fn is_ready(&self) -> bool {
        false
    }

    fn remove_styles(&mut self, id: &str) -> Result<usize, DomError> {
        self.call("removeStyles", &[id]);
        Ok(self.styles.remove(id).unwrap_or(0))
    }

    fn append_style(&mut self, id: &str, css: &str) -> Result<(), DomError> {
        self.call("appendStyle", &[id, css]);
        *self.styles.entry(id.to_string()).or_insert(0) += 1;
        Ok(())
    }

    fn style_count(&self, id: &str) -> usize {
        self.styles.get(id).copied().unwrap_or(0)
    }

    fn remove_class(&mut self, anchor: Anchor, class: &str) -> Result<bool, DomError> {
        let which = match anchor {
            Anchor::Root => "root",
            Anchor::Body => "body",
        };
        self.call("removeClass", &[which, class]);
        Ok(false)
    }

    fn set_inline_style(
        &mut self,
        selector: &str,
        property: &str,
        value: &str,
    ) -> Result<usize, DomError> {
        self.call("setInline", &[selector, property, value]);
        Ok(0)
    }

    fn observe_mutations(&mut self, sink: MutationSink) -> Result<(), DomError> {
        self.route.set(sink);
        self.queued.push("cs.observe(true);".to_string());
        Ok(())
    }

    fn disconnect(&mut self) {
        self.route.clear();
        self.queued.push("cs.observe(false);".to_string());
    }

    fn flush(&mut self) -> Result<(), DomError> {
        if self.queued.is_empty() {
            return Ok(());
        }
        let calls = std::mem::take(&mut self.queued);
        debug!(calls = calls.len(), "flushing pass script");
        self.scripts
            .send(wrap(&calls))
            .map_err(|_| DomError::ChannelClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use chatskin_config::SkinConfig;
    use chatskin_enforcer::{Enforcer, Injector};
    use tokio::sync::mpsc as tokio_mpsc;

    fn document() -> (ScriptDocument, mpsc::Receiver<String>, MutationRoute) {
        let (tx, rx) = mpsc::channel();
        let route = MutationRoute::new();
        (ScriptDocument::new(tx, route.clone()), rx, route)
    }

    #[test]
    fn never_ready_on_its_own() {
        let (doc, _rx, _route) = document();
        assert!(!doc.is_ready());
    }

    #[test]
    fn flush_sends_one_wrapped_script() {
        let (mut doc, rx, _route) = document();
        doc.remove_styles("chatskin-theme").unwrap();
        doc.append_style("chatskin-theme", "body { color: #111; }").unwrap();
        assert_eq!(doc.pending().len(), 2);

        doc.flush().unwrap();
        assert!(doc.pending().is_empty());

        let script = rx.try_recv().unwrap();
        assert!(script.contains("var cs = window.__chatskin;"));
        assert!(script.contains(r#"cs.removeStyles("chatskin-theme");"#));
        assert!(script.contains(r#"cs.appendStyle("chatskin-theme", "body { color: #111; }");"#));
        assert!(script.contains("cs.report('pass', e);"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn each_call_is_guarded_separately() {
        let (mut doc, rx, _route) = document();
        doc.remove_styles("chatskin-theme").unwrap();
        doc.set_inline_style("main", "color", "#111").unwrap();
        doc.append_style("chatskin-theme", "body {}").unwrap();
        doc.flush().unwrap();

        let script = rx.try_recv().unwrap();
        assert_eq!(script.matches("try { ").count(), 3);
        assert_eq!(script.matches("catch (e)").count(), 3);
        let lines: Vec<&str> = script.lines().filter(|l| l.contains("try { ")).collect();
        assert!(lines[0].contains("cs.removeStyles("));
        assert!(lines[1].contains("cs.setInline("));
        assert!(lines[2].contains("cs.appendStyle("));
        for line in lines {
            assert!(line.ends_with("} catch (e) { cs.report('pass', e); }"), "{line}");
        }
    }

    #[test]
    fn empty_flush_sends_nothing() {
        let (mut doc, rx, _route) = document();
        doc.flush().unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn arguments_are_escaped() {
        let (mut doc, rx, _route) = document();
        doc.set_inline_style(r#"nav[aria-label="Sidebar"]"#, "background-color", "#fff")
            .unwrap();
        doc.append_style("s", "a::before { content: \"\\\"\"; }\n</script>")
            .unwrap();
        doc.flush().unwrap();

        let script = rx.try_recv().unwrap();
        assert!(script.contains(
            r##"cs.setInline("nav[aria-label=\"Sidebar\"]", "background-color", "#fff");"##
        ));
        assert!(script.contains(r#"\n</script>"#));
        assert!(!script.contains("}\n</script>"));
    }

    #[test]
    fn style_count_tracks_create_and_replace() {
        let (mut doc, _rx, _route) = document();
        let injector = Injector::new("chatskin-theme");

        injector.apply(&mut doc, "a {}").unwrap();
        assert_eq!(doc.style_count("chatskin-theme"), 1);
        injector.apply(&mut doc, "b {}").unwrap();
        assert_eq!(doc.style_count("chatskin-theme"), 1);

        assert_eq!(injector.remove(&mut doc).unwrap(), 1);
        assert_eq!(doc.style_count("chatskin-theme"), 0);
    }

    #[test]
    fn anchors_map_to_helper_names() {
        let (mut doc, _rx, _route) = document();
        assert!(!doc.remove_class(Anchor::Root, "dark").unwrap());
        doc.remove_class(Anchor::Body, "dark").unwrap();
        assert_eq!(
            doc.pending(),
            [
                r#"cs.removeClass("root", "dark");"#.to_string(),
                r#"cs.removeClass("body", "dark");"#.to_string(),
            ]
        );
    }

    #[test]
    fn observe_and_disconnect_manage_the_route() {
        let (mut doc, _rx, route) = document();
        let (sink, mut records) = tokio_mpsc::unbounded_channel();

        assert!(!route.deliver(MutationRecord::added(1)));

        doc.observe_mutations(sink).unwrap();
        assert!(route.is_connected());
        assert!(route.deliver(MutationRecord::added(2)));
        assert_eq!(records.try_recv().unwrap(), MutationRecord::added(2));

        doc.disconnect();
        assert!(!route.is_connected());
        assert!(!route.deliver(MutationRecord::added(1)));
        assert_eq!(
            doc.pending(),
            ["cs.observe(true);".to_string(), "cs.observe(false);".to_string()]
        );
    }

    #[test]
    fn closed_channel_is_reported() {
        let (mut doc, rx, _route) = document();
        drop(rx);
        doc.append_style("s", "a {}").unwrap();
        assert!(matches!(doc.flush(), Err(DomError::ChannelClosed)));
        assert!(doc.pending().is_empty());
    }

    #[test]
    fn a_pass_becomes_a_single_script() {
        let (mut doc, rx, _route) = document();
        let enforcer = Enforcer::from_config(&SkinConfig::default()).unwrap();

        let report = enforcer.run_pass(&mut doc).unwrap();
        assert_eq!(report.elements_touched, 0);
        assert_eq!(report.markers_removed, 0);
        assert_eq!(doc.style_count("chatskin-theme"), 1);

        let script = rx.try_recv().unwrap();
        assert!(script.contains(r#"cs.removeClass("root", "dark");"#));
        assert!(script.contains(&js_string(enforcer.stylesheet())));
        assert_eq!(script.matches("cs.setInline(").count(), enforcer.overrides().len());
        assert!(rx.try_recv().is_err());
    }
}
