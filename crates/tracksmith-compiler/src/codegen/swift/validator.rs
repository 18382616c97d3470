//! Static Swift payload validator.

/// `PayloadValidator.swift`, rewritten on every run.
pub const PAYLOAD_VALIDATOR: &str = r#"import Foundation

struct PayloadValidator {

    static func checkPayload(_ payload: [String: Any]) -> [String: Any] {
        var updatedPayload = payload

        for (key, value) in updatedPayload {
            updatedPayload[key] = checkValue(value, key: key)
        }

        return updatedPayload
    }

    private static func checkValue(_ value: Any, key: String?) -> Any {
        switch value {
        case let str as String:
            if str.isEmpty {
                print("⚠️ TrackerExtension: \(key ?? "unknown key") is empty")
            }
            return value

        case let unsignedInt as UInt:
            if key == "chkout", unsignedInt != 50 {
                print("⚠️ TrackerExtension: Checkout confirmation page value \(value) must be 50.")
            }
            return value

        case let array as [Any]:
            return checkArray(array, key: key)

        case let nestedDict as [String: Any]:
            return checkPayload(nestedDict)

        default:
            return value
        }
    }

    private static func checkArray(_ array: [Any], key: String?) -> [Any] {
        var updatedArray = array

        for (index, element) in updatedArray.enumerated() {
            updatedArray[index] = checkValue(element, key: key.map { "\($0) at index \(index)" })
        }

        return updatedArray
    }

}
"#;
