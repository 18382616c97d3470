//! Static TypeScript payload validator.

/// `PayloadValidator.ts`, rewritten on every run.
pub const PAYLOAD_VALIDATOR: &str = r#"export class PayloadValidator {
  static checkPayload(payload: Record<string, unknown>): Record<string, unknown> {
    const updated: Record<string, unknown> = {};
    for (const [key, value] of Object.entries(payload)) {
      updated[key] = PayloadValidator.checkValue(value, key);
    }
    return updated;
  }

  private static checkValue(value: unknown, key: string | undefined): unknown {
    if (typeof value === 'string') {
      if (value.length === 0) {
        console.warn(`⚠️ TrackerExtension: ${key ?? 'unknown key'} is empty`);
      }
      return value;
    }

    if (typeof value === 'number') {
      if (key === 'chkout' && Number.isInteger(value) && value >= 0 && value !== 50) {
        console.warn(`⚠️ TrackerExtension: Checkout confirmation page value ${value} must be 50.`);
      }
      return value;
    }

    if (Array.isArray(value)) {
      return value.map((element, index) =>
        PayloadValidator.checkValue(element, key === undefined ? undefined : `${key} at index ${index}`),
      );
    }

    if (value !== null && typeof value === 'object') {
      return PayloadValidator.checkPayload(value as Record<string, unknown>);
    }

    return value;
  }
}
"#;
